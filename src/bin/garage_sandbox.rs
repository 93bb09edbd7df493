//! Garage Sandbox - Headless Demo
//!
//! Scripted run of the garage in a sandbox world: the player looks down at
//! the floor, places a row of cubes, joins them into a car, starts it and
//! drives for a few seconds. Progress goes to the log.
//!
//! Run with: `RUST_LOG=debug cargo run --bin garage_sandbox [config.json]`

use glam::{Vec2, Vec3};

use block_garage_engine::game::{GameConfig, GarageSession};
use block_garage_engine::input::{ActionFrame, InputAction};
use block_garage_engine::physics::{ObjectId, PhysicsWorld, Prefab, SandboxWorld};
use block_garage_engine::world::Pose;

const FRAME_DT: f32 = 1.0 / 60.0;
const DRIVE_SECONDS: f32 = 3.0;

/// Look delta that pitches the default camera about 30 degrees down.
const LOOK_DOWN: Vec2 = Vec2::new(0.0, -300.0);

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("===========================================");
    println!("   Block Garage - Sandbox");
    println!("===========================================");

    let config = match std::env::args().nth(1) {
        Some(path) => match GameConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("[Config] {e}");
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };

    let mut world = SandboxWorld::new();
    world.spawn_ground(200.0, 0.0);
    let rig = GarageSession::spawn_player(&mut world, Vec3::new(1.0, 2.5, -20.0));
    let mut session = GarageSession::new(&config, rig);

    // Look down at the floor and enter placement mode
    session.frame(&mut world, &ActionFrame::new().with_look(LOOK_DOWN), FRAME_DT);
    session.frame(
        &mut world,
        &ActionFrame::new().with_pressed(InputAction::TogglePlacement),
        FRAME_DT,
    );

    let blocks = build_row(&mut session, &mut world, 3, config.grid.grid_size);
    if blocks.len() < 2 {
        log::error!("[Builder] Only {} blocks placed, nothing to drive", blocks.len());
        std::process::exit(1);
    }

    // Leave placement mode so the preview does not hide the car
    session.frame(
        &mut world,
        &ActionFrame::new().with_pressed(InputAction::TogglePlacement),
        FRAME_DT,
    );

    for pair in blocks.windows(2) {
        world.add_fixed_joint(pair[0], pair[1]);
    }
    let driver = blocks[blocks.len() - 1];
    let seat = mount_seat(&mut world, driver, config.grid.grid_size);
    session.add_driver(driver, Some(seat));

    let report = session.frame(
        &mut world,
        &ActionFrame::new().with_pressed(InputAction::StartVehicle),
        FRAME_DT,
    );
    if report.started.is_none() {
        log::error!("[Vehicle] No vehicle under the crosshair");
        std::process::exit(1);
    }

    let start = world.pose(driver).map(|p| p.position).unwrap_or_default();
    let drive = ActionFrame::new()
        .with_held(InputAction::DriveForward)
        .with_held(InputAction::TurnLeft);
    let ticks = (DRIVE_SECONDS / FRAME_DT) as usize;
    for tick in 0..ticks {
        session.frame(&mut world, &drive, FRAME_DT);
        session.fixed_tick(&mut world, &drive, FRAME_DT);
        world.step(FRAME_DT);
        if tick % 60 == 0 {
            if let Some(pose) = world.pose(driver) {
                log::info!("[Vehicle] t={:.1}s driver at {:.2}", tick as f32 * FRAME_DT, pose.position);
            }
        }
    }

    let end = world.pose(driver).map(|p| p.position).unwrap_or_default();
    log::info!(
        "[Vehicle] Drove {:.2} m, player {} driving",
        (end - start).length(),
        if session.is_driving() { "still" } else { "not" }
    );
}

/// Place `count` cubes in a row to the player's right, one cell apart.
fn build_row(
    session: &mut GarageSession,
    world: &mut SandboxWorld,
    count: usize,
    grid_size: f32,
) -> Vec<ObjectId> {
    let speed = session.locomotion.config().speed;
    let mut placed = Vec::with_capacity(count);

    for i in 0..count {
        if i > 0 {
            // Strafe exactly one cell in a single frame
            session.frame(
                world,
                &ActionFrame::new().with_held(InputAction::MoveRight),
                grid_size / speed,
            );
        }
        let report = session.frame(
            world,
            &ActionFrame::new().with_pressed(InputAction::ConfirmPlacement),
            FRAME_DT,
        );
        match report.placed {
            Some(id) => {
                let position = world.pose(id).map(|p| p.position).unwrap_or_default();
                log::info!("[Builder] Block {} at {position}", i + 1);
                placed.push(id);
            }
            None => log::warn!("[Builder] Block {} could not be placed", i + 1),
        }
    }
    placed
}

/// Empty seat object above `driver`, carried with it.
fn mount_seat(world: &mut SandboxWorld, driver: ObjectId, grid_size: f32) -> ObjectId {
    let above = world
        .pose(driver)
        .map(|p| p.position + Vec3::Y * grid_size * 1.5)
        .unwrap_or_default();
    let seat = world.instantiate(&Prefab::empty("Seat"), Pose::at(above));
    world.set_parent(seat, Some(driver));
    seat
}
