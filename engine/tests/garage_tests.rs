//! Garage Tests - Building and Driving Through a Session
//!
//! End-to-end runs of `GarageSession` against the sandbox world: placing
//! blocks from the player's view, the hold pose, and starting a joined car.

use glam::{Vec2, Vec3};
use block_garage_engine::game::{GameConfig, GarageSession, PreviewTarget};
use block_garage_engine::input::{ActionFrame, InputAction, InputState, KeyCode};
use block_garage_engine::physics::{ObjectId, PhysicsWorld, Prefab, SandboxWorld};
use block_garage_engine::world::Pose;

const DT: f32 = 1.0 / 60.0;

fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-3
}

/// Ground at y = 0 and a player at `(x, 2.5, -20)` pitched 30 degrees down.
fn setup(x: f32) -> (SandboxWorld, GarageSession) {
    let mut world = SandboxWorld::new();
    world.spawn_ground(200.0, 0.0);
    let rig = GarageSession::spawn_player(&mut world, Vec3::new(x, 2.5, -20.0));
    let mut session = GarageSession::new(&GameConfig::default(), rig);
    session.frame(&mut world, &ActionFrame::new().with_look(Vec2::new(0.0, -300.0)), DT);
    (world, session)
}

fn press(action: InputAction) -> ActionFrame {
    ActionFrame::new().with_pressed(action)
}

/// Place a row of cubes by strafing one cell right between placements.
fn build_row(world: &mut SandboxWorld, session: &mut GarageSession, count: usize) -> Vec<ObjectId> {
    session.frame(world, &press(InputAction::TogglePlacement), DT);
    let mut placed = Vec::new();
    for i in 0..count {
        if i > 0 {
            let strafe = ActionFrame::new().with_held(InputAction::MoveRight);
            session.frame(world, &strafe, 5.0 / 120.0);
        }
        let report = session.frame(world, &press(InputAction::ConfirmPlacement), DT);
        placed.push(report.placed.expect("placement refused"));
    }
    session.frame(world, &press(InputAction::TogglePlacement), DT);
    placed
}

// ============================================================================
// Placement
// ============================================================================

#[test]
fn test_look_down_and_place_cube() {
    let (mut world, mut session) = setup(1.0);
    assert!((session.locomotion.pitch() - 30.0).abs() < 1e-4);

    session.frame(&mut world, &press(InputAction::TogglePlacement), DT);
    assert_eq!(session.placer.target(), Some(PreviewTarget::Surface { valid: true }));

    let report = session.frame(&mut world, &press(InputAction::ConfirmPlacement), DT);
    let id = report.placed.unwrap();
    // Floor contact at z = -12.2 lands in the cell centred on z = -12.5
    assert!(approx(world.pose(id).unwrap().position, Vec3::new(2.5, 0.0, -12.5)));
}

#[test]
fn test_row_of_cubes_fills_neighbouring_cells() {
    let (mut world, mut session) = setup(1.0);
    let blocks = build_row(&mut world, &mut session, 3);
    let xs: Vec<f32> = blocks.iter().map(|id| world.pose(*id).unwrap().position.x).collect();
    for (x, expected) in xs.iter().zip([2.5, 7.5, 12.5]) {
        assert!((x - expected).abs() < 1e-3, "{xs:?}");
    }
    assert_eq!(session.placer.placed(), blocks.as_slice());
}

#[test]
fn test_cell_holding_the_player_is_refused() {
    let (mut world, mut session) = setup(1.0);
    session.frame(&mut world, &press(InputAction::TogglePlacement), DT);
    assert!(session.frame(&mut world, &press(InputAction::ConfirmPlacement), DT).placed.is_some());

    // The ray now meets the new cube's front face, which targets the cell
    // between it and the player
    let report = session.frame(&mut world, &press(InputAction::ConfirmPlacement), DT);
    assert!(report.placed.is_none());
    assert_eq!(session.placer.target(), Some(PreviewTarget::Surface { valid: false }));
    let preview = session.placer.preview().unwrap();
    assert!(approx(world.pose(preview).unwrap().position, Vec3::new(2.5, 0.0, -17.5)));
    assert_eq!(session.placer.placed().len(), 1);
}

#[test]
fn test_hold_pose_when_looking_at_sky() {
    let mut world = SandboxWorld::new();
    world.spawn_ground(200.0, 0.0);
    let rig = GarageSession::spawn_player(&mut world, Vec3::new(0.0, 2.5, 0.0));
    let mut session = GarageSession::new(&GameConfig::default(), rig);

    // Look up, away from the floor
    session.frame(&mut world, &ActionFrame::new().with_look(Vec2::new(0.0, 300.0)), DT);
    session.frame(&mut world, &press(InputAction::TogglePlacement), DT);
    assert_eq!(session.placer.target(), Some(PreviewTarget::Held));

    let preview = session.placer.preview().unwrap();
    let pose = world.pose(preview).unwrap();
    // Held above and in front of the body, turned to face it
    assert!(approx(pose.position, Vec3::new(0.0, 29.5, 8.0)));
    assert!(approx(pose.forward(), Vec3::NEG_Z));

    // Nothing is placed from the hold pose
    let report = session.frame(&mut world, &press(InputAction::ConfirmPlacement), DT);
    assert!(report.placed.is_none());
}

// ============================================================================
// Vehicles
// ============================================================================

fn car(world: &mut SandboxWorld, session: &mut GarageSession) -> Vec<ObjectId> {
    let blocks = build_row(world, session, 3);
    world.add_fixed_joint(blocks[0], blocks[1]);
    world.add_fixed_joint(blocks[1], blocks[2]);
    let seat_at = world.pose(blocks[2]).unwrap().position + Vec3::new(0.0, 7.5, 0.0);
    let seat = world.instantiate(&Prefab::empty("Seat"), Pose::at(seat_at));
    world.set_parent(seat, Some(blocks[2]));
    session.add_driver(blocks[2], Some(seat));
    blocks
}

#[test]
fn test_start_car_from_any_block_and_drive() {
    let (mut world, mut session) = setup(1.0);
    let blocks = car(&mut world, &mut session);

    // Player stands in front of the last block, which carries the driver
    session.frame(&mut world, &ActionFrame::new(), DT);
    assert_eq!(session.starter.target(), Some(blocks[2]));
    assert!(session.starter.prompt().is_visible());

    let report = session.frame(&mut world, &press(InputAction::StartVehicle), DT);
    assert_eq!(report.started, Some(blocks[2]));
    assert!(session.is_driving());
    assert!(!session.locomotion.is_enabled());
    for id in &blocks {
        assert!(world.dynamics(*id).unwrap().is_free(), "{id} still frozen");
    }

    let start = world.pose(blocks[2]).unwrap().position;
    let drive = ActionFrame::new().with_held(InputAction::DriveForward);
    for _ in 0..30 {
        session.frame(&mut world, &drive, DT);
        session.fixed_tick(&mut world, &drive, DT);
        world.step(DT);
    }
    let end = world.pose(blocks[2]).unwrap().position;
    assert!(end.z > start.z, "{start} -> {end}");
    // Joined blocks move together
    let gap = world.pose(blocks[1]).unwrap().position - end;
    assert!(approx(gap, Vec3::new(-5.0, 0.0, 0.0)));
}

#[test]
fn test_unjoined_block_stays_frozen_on_start() {
    let (mut world, mut session) = setup(1.0);
    let blocks = build_row(&mut world, &mut session, 3);
    world.add_fixed_joint(blocks[1], blocks[2]);
    session.add_driver(blocks[2], None);

    session.frame(&mut world, &press(InputAction::StartVehicle), DT);
    assert!(world.dynamics(blocks[1]).unwrap().is_free());
    assert!(world.dynamics(blocks[2]).unwrap().is_free());
    assert!(!world.dynamics(blocks[0]).unwrap().is_free());
}

#[test]
fn test_drive_input_ignored_until_started() {
    let (mut world, mut session) = setup(1.0);
    let blocks = car(&mut world, &mut session);
    let before = world.pose(blocks[2]).unwrap().position;

    let drive = ActionFrame::new().with_held(InputAction::DriveForward);
    session.fixed_tick(&mut world, &drive, DT);
    world.step(DT);
    assert_eq!(world.pose(blocks[2]).unwrap().position, before);
}

// ============================================================================
// Config and input plumbing
// ============================================================================

#[test]
fn test_rebound_start_key_from_config_file() {
    let path = std::env::temp_dir().join(format!("garage_config_{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "input": { "vehicle": { "start": "Digit3" } } }"#).unwrap();
    let config = GameConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let bindings = config.input.to_bindings();
    let mut input = InputState::new();
    input.keyboard.handle_key(KeyCode::Digit3, true);
    assert!(input.snapshot(&bindings).pressed(InputAction::StartVehicle));

    input.end_frame();
    input.keyboard.handle_key(KeyCode::Q, true);
    assert!(!input.snapshot(&bindings).pressed(InputAction::StartVehicle));
}
