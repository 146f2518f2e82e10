use tui_tiles::core::{seeded, Grid, Tile};
use tui_tiles::engine::{ActuatorMetadata, MemoryStorage, NoTelemetry, Session};
use tui_tiles::term::{BoardFrame, GameView, Message, TerminalActuator, TerminalRenderer, Viewport};
use tui_tiles::types::{Direction, GameAction, Ruleset, TileKind};

fn metadata(ruleset: Ruleset) -> ActuatorMetadata {
    ActuatorMetadata {
        ruleset,
        score: 0,
        best_score: 0,
        over: false,
        won: false,
        terminated: false,
        heavy_countdown: ruleset.tracks_heavy().then_some(10),
    }
}

fn render(grid: &Grid, meta: &ActuatorMetadata, vp: Viewport) -> tui_tiles::term::FrameBuffer {
    let frame = BoardFrame {
        grid,
        metadata: meta,
        hints: None,
        score_change: 0,
        message: Message::from_metadata(meta),
    };
    GameView::default().render(&frame, vp)
}

#[test]
fn term_view_renders_border_corners() {
    // 4 cells of 8x4 plus the inner edge => 33x17, plus border => 35x19
    let meta = metadata(Ruleset::Classic);
    let fb = render(&Grid::new(), &meta, Viewport::new(35, 19));

    assert_eq!(fb.get(0, 0).unwrap().ch, '╭');
    assert_eq!(fb.get(34, 0).unwrap().ch, '╮');
    assert_eq!(fb.get(0, 18).unwrap().ch, '╰');
    assert_eq!(fb.get(34, 18).unwrap().ch, '╯');
}

#[test]
fn term_view_centers_tile_labels() {
    let grid = Grid::from_tiles([
        Tile::number(0, 0, 2048),
        Tile::at(1, 2, TileKind::Multiply, 4, false),
    ])
    .unwrap();
    let meta = metadata(Ruleset::Log);
    let fb = render(&grid, &meta, Viewport::new(35, 19));

    // Tile (0, 0) occupies columns 2..9 and rows 2..5; its label sits on the middle row.
    let row: Vec<char> = fb.row_text(3).chars().collect();
    assert_eq!(row[5..9].iter().collect::<String>(), "2048");

    // Tile (1, 2): x = 2 + 8, y = 2 + 8, label "×4" on row 11.
    let row: Vec<char> = fb.row_text(11).chars().collect();
    assert_eq!(row[12..14].iter().collect::<String>(), "×4");
}

#[test]
fn term_view_shows_heavy_countdown_in_panel() {
    let meta = metadata(Ruleset::Heavy);
    let fb = render(&Grid::new(), &meta, Viewport::new(80, 24));
    let text: String = (0..fb.height()).map(|y| fb.row_text(y) + "\n").collect();
    assert!(text.contains("HEAVY"));
    assert!(text.contains("HEAVY IN"));
    assert!(text.contains("10"));
}

#[test]
fn terminal_actuator_draws_a_live_session() {
    let renderer = TerminalRenderer::new(Vec::new());
    let mut actuator = TerminalActuator::new(renderer, Viewport::new(80, 24));
    {
        let mut session = Session::new(
            Ruleset::Classic,
            seeded(3),
            MemoryStorage::new(),
            &mut actuator,
            NoTelemetry,
        );
        session.handle(GameAction::Move(Direction::Left)).unwrap();
        session.handle(GameAction::Move(Direction::Up)).unwrap();
    }
    assert!(!actuator.renderer_mut().writer().is_empty());
    assert_eq!(actuator.message(), None);
}
