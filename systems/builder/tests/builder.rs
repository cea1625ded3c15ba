use glam::Vec2;
use wave_defence_core::{Command, Event, PlacementError, PlacementPreview, TowerId, TowerKind};
use wave_defence_system_builder::{Builder, BuilderInput};
use wave_defence_world::{self as world, query, Level, World, WorldConfig};

fn bolt_preview(placeable: bool) -> PlacementPreview {
    PlacementPreview {
        kind: TowerKind::Bolt,
        position: Vec2::new(48.0, 48.0),
        snapped: Some(Vec2::new(48.0, 48.0)),
        rejection: (!placeable).then_some(PlacementError::BlockedByWall),
    }
}

const CONFIRM: BuilderInput = BuilderInput {
    select: None,
    confirm: true,
    cancel: false,
};

#[test]
fn confirm_emits_place_command_for_valid_preview() {
    let mut builder = Builder::default();
    let mut commands = Vec::new();

    builder.move_cursor(Some(Vec2::new(48.0, 48.0)), &mut commands);
    builder.handle(Some(bolt_preview(true)), CONFIRM, &mut commands);

    assert_eq!(
        commands,
        vec![
            Command::MovePlacement {
                cursor: Vec2::new(48.0, 48.0),
            },
            Command::ConfirmPlacement,
        ],
        "builder should confirm a valid preview",
    );
}

#[test]
fn confirm_ignored_when_preview_not_placeable() {
    let mut builder = Builder::default();
    let mut commands = Vec::new();

    builder.move_cursor(Some(Vec2::new(48.0, 48.0)), &mut commands);
    builder.handle(Some(bolt_preview(false)), CONFIRM, &mut commands);

    assert!(
        !commands.contains(&Command::ConfirmPlacement),
        "invalid previews must not be confirmed",
    );
}

#[test]
fn confirm_ignored_while_cursor_is_off_the_play_area() {
    let mut builder = Builder::new();
    let mut commands = Vec::new();

    builder.move_cursor(Some(Vec2::new(48.0, 48.0)), &mut commands);
    builder.move_cursor(None, &mut commands);
    builder.handle(Some(bolt_preview(true)), CONFIRM, &mut commands);

    assert_eq!(
        commands,
        vec![Command::MovePlacement {
            cursor: Vec2::new(48.0, 48.0),
        }]
    );
}

#[test]
fn unchanged_cursor_is_not_forwarded_twice() {
    let mut builder = Builder::new();
    let mut commands = Vec::new();

    builder.move_cursor(Some(Vec2::new(10.0, 20.0)), &mut commands);
    builder.move_cursor(Some(Vec2::new(10.0, 20.0)), &mut commands);
    builder.move_cursor(Some(Vec2::new(12.0, 20.0)), &mut commands);

    assert_eq!(
        commands,
        vec![
            Command::MovePlacement {
                cursor: Vec2::new(10.0, 20.0),
            },
            Command::MovePlacement {
                cursor: Vec2::new(12.0, 20.0),
            },
        ]
    );
}

#[test]
fn selection_starts_and_cancel_discards_a_preview() {
    let builder = Builder::new();
    let mut commands = Vec::new();

    builder.handle(
        None,
        BuilderInput {
            select: Some(TowerKind::Bubble),
            ..BuilderInput::default()
        },
        &mut commands,
    );
    builder.handle(
        None,
        BuilderInput {
            cancel: true,
            ..BuilderInput::default()
        },
        &mut commands,
    );
    builder.handle(
        Some(bolt_preview(true)),
        BuilderInput {
            cancel: true,
            confirm: true,
            ..BuilderInput::default()
        },
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![
            Command::BeginPlacement {
                kind: TowerKind::Bubble,
            },
            Command::CancelPlacement,
        ]
    );
}

#[test]
fn move_and_click_in_one_frame_places_at_the_new_position() {
    let level = Level::from_rows(&["S.....", "......", ".....G"], 32.0).expect("open level");
    let mut world = World::new(level, WorldConfig::default()).expect("open world");
    let mut builder = Builder::new();
    let mut events = Vec::new();

    let frames = [
        (
            Some(Vec2::new(400.0, 16.0)),
            BuilderInput {
                select: Some(TowerKind::Bubble),
                ..BuilderInput::default()
            },
        ),
        (Some(Vec2::new(100.0, 50.0)), CONFIRM),
    ];

    for (cursor, input) in frames {
        let mut commands = Vec::new();
        builder.move_cursor(cursor, &mut commands);
        for command in commands.drain(..) {
            world::apply(&mut world, command, &mut events);
        }
        builder.handle(query::placement_preview(&world), input, &mut commands);
        for command in commands {
            world::apply(&mut world, command, &mut events);
        }
    }

    assert_eq!(query::tower_view(&world).len(), 1);
    assert!(events.contains(&Event::TowerPlaced {
        tower: TowerId::new(0),
        kind: TowerKind::Bubble,
        position: Vec2::new(112.0, 48.0),
        cost: 80,
    }));
    assert_eq!(query::credits(&world), 70);
}
