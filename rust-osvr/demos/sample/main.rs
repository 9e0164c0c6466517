//! Headless sample: drives a stereo head from tracked or scripted input.
//!
//! Run with `cargo run --example sample -- --mock --frames 300`.

#[macro_use]
extern crate log;

mod axes;
mod game;
mod input;
mod keyboard;
mod mouselook;

use anyhow::Context;
use clap::Parser;
use rust_osvr::api::MockClientKitCreator;
use rust_osvr::math::Quat;
use rust_osvr::native::OSVR_Quaternion;
use rust_osvr::{ClientKit, ClientKitPtr, HeadSettings, InterfaceSignal, MockControlMsg, RawReport, Viewport};
use std::path::PathBuf;
use std::sync::mpsc::Sender;

use crate::game::SampleGame;
use crate::input::ScriptedInput;
use crate::keyboard::{KeyboardOrientationSignal, WasdOrientationSignal};

const FRAME_TIME: f32 = 1.0 / 60.0;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Use the in-process mock server instead of osvrClientKit
    #[arg(long)]
    mock: bool,

    /// Number of frames to run before exiting
    #[arg(long, default_value_t = 600)]
    frames: u32,

    /// Head settings (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Application identifier reported to the server
    #[arg(long, default_value = "com.osvr.rust.sample")]
    app_id: String,
}

fn to_native(q: &Quat) -> OSVR_Quaternion {
    OSVR_Quaternion::new(q.r as f64, q.i as f64, q.j as f64, q.k as f64)
}

fn connect(args: &Args) -> anyhow::Result<(ClientKitPtr, Option<Sender<MockControlMsg>>)> {
    if !args.mock {
        #[cfg(feature = "clientkit")]
        match ClientKit::new(&args.app_id) {
            Ok(kit) => return Ok((kit, None)),
            Err(e) => warn!("Falling back to the mock server: {}", e),
        }
    }
    let (context, remote) = MockClientKitCreator::new_with_remote(&args.app_id);
    Ok((ClientKit::with_context(Box::new(context)), Some(remote)))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = match args.config {
        Some(ref path) => HeadSettings::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => HeadSettings::default(),
    };

    let (kit, remote) = connect(&args)?;
    let viewport = Viewport::new(0, 0, 1920, 1080);
    let mut game = SampleGame::new(kit, &viewport, settings)?;

    // Without hardware, the arrow keys stand in for the head and W/A/S/D for the right hand.
    let mut head_keys = KeyboardOrientationSignal::arrows();
    let mut hand_keys = WasdOrientationSignal::wasd();
    let mut script = ScriptedInput::new((viewport.width / 2, viewport.height / 2));

    let mut frame = 0;
    loop {
        let input = script.frame(frame, args.frames);
        if let Some(ref remote) = remote {
            head_keys.update(input);
            hand_keys.update(input);
            let reports = [
                ("/me/head", head_keys.value()),
                ("/me/hands/right", hand_keys.value()),
            ];
            for (path, rotation) in reports {
                let report = RawReport::orientation(to_native(&rotation));
                remote.send(MockControlMsg::Report(path.to_owned(), report))?;
            }
        }

        if !game.update(FRAME_TIME, input)? {
            break;
        }
        game.draw(&viewport)?;
        frame += 1;
    }

    info!(
        "Stopped after {} frames in {:?} mode at {:?}, IPD {:.3} m",
        frame,
        game.mode(),
        game.position(),
        game.head().ipd_in_meters()
    );
    game.shutdown();
    Ok(())
}
