use std::path::{Path, PathBuf};
use anyhow::{ensure, Result};
use clap::Parser;
use raylib::prelude::*;
use rfd::FileDialog;
use tracing::{debug, info};

mod config;
mod constants;
mod controller;
mod desktop;
mod error;
mod ffmpeg;
mod layer;
mod logging;
mod media;
mod notice;
mod panel;
mod presentation;
mod render;
mod scene;
mod settings;
mod state;
mod texture_loader;

use crate::config::Cli;
use crate::constants::*;
use crate::controller::OverlayController;
use crate::desktop::{DesktopSession, RaylibGateway};
use crate::layer::MediaStage;
use crate::notice::{Notice, Notifier, Toaster};
use crate::panel::{key_command, Command, PanelInput, PanelLayout};
use crate::presentation::PresentationGateway;
use crate::scene::compose;

fn choose_media(controller: &OverlayController) -> Option<PathBuf> {
    let accept = controller.accept();
    FileDialog::new()
        .set_title("Choose media to overlay")
        .add_filter(accept.filter_label(), accept.extensions().as_slice())
        .pick_file()
}

fn open(controller: &mut OverlayController, path: &Path, toaster: &mut Toaster) {
    // Rejections are already surfaced as toasts
    if let Ok(intake) = controller.select_media(path, toaster) {
        debug!(handle = ?intake.handle, kind = intake.kind.label(), replaced = ?intake.replaced, "media selected");
    }
}

fn apply(
    command: Command,
    controller: &mut OverlayController,
    gateway: &mut impl PresentationGateway,
    toaster: &mut Toaster,
) {
    debug!(?command, "command");
    match command {
        Command::ChooseMedia => {
            if let Some(path) = choose_media(controller) {
                open(controller, &path, toaster);
            }
        }
        Command::Open(path) => open(controller, &path, toaster),
        Command::SetOpacity(percent) => controller.set_opacity(percent),
        Command::SetAccent(accent) => controller.set_accent(accent),
        Command::SetSpeed(secs) => controller.set_animation_period(secs),
        Command::TogglePresentation => controller.toggle_presentation(gateway, toaster),
        Command::TogglePanel => controller.toggle_panel(),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.debug);
    info!(?cli, accent = cli.accent.name(), "starting");
    ensure!(
        cli.width > 0 && cli.height > 0,
        "window size must be positive, got {}x{}",
        cli.width,
        cli.height
    );

    let (mut rl, thread) = raylib::init()
        .size(cli.width, cli.height)
        .title("ScreenFloat")
        .vsync()
        .resizable()
        .transparent()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(logging::raylib_trace_level(cli.debug));
    // Escape leaves presentation mode instead of closing the window
    rl.set_exit_key(None);

    let mut controller = OverlayController::new(cli.display_settings(), cli.policy, cli.accept());
    let mut toaster = Toaster::default();
    let mut session = DesktopSession::default();
    let mut stage = MediaStage::default();
    let mut input = PanelInput::default();

    if let Some(path) = &cli.media {
        open(&mut controller, path, &mut toaster);
    }

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();

        // --- Input ---
        let scene = compose(controller.state());
        let layout = PanelLayout::new(rl.get_screen_width() as f32, rl.get_screen_height() as f32);
        let mut commands = Vec::new();

        let mouse = rl.get_mouse_position();
        let pressed = rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT);
        let down = rl.is_mouse_button_down(MouseButton::MOUSE_BUTTON_LEFT);
        if let Some(command) = input.pointer(&layout, &scene.panel, mouse, pressed, down) {
            commands.push(command);
        }

        while let Some(key) = rl.get_key_pressed() {
            if let Some(command) = key_command(key, &scene.panel) {
                commands.push(command);
            }
        }

        if rl.is_file_dropped() {
            // Always drain the drop list; drops onto a hidden panel are ignored
            let dropped = rl.load_dropped_files();
            if !scene.panel.hidden {
                for path in dropped.paths() {
                    commands.push(Command::Open(path.into()));
                }
            }
        }

        {
            let mut gateway = RaylibGateway::new(&mut rl, &mut session);
            for command in commands {
                apply(command, &mut controller, &mut gateway, &mut toaster);
            }
            controller.poll_external_exit(&mut gateway, &mut toaster);
        }

        // --- Update ---
        let scene = compose(controller.state());
        if let Err(e) = stage.sync(&mut rl, &thread, controller.media()) {
            toaster.notify(Notice::error("Could not play media").with_description(e.to_string()));
        }
        let period_secs = scene.overlay.map_or(0.0, |overlay| overlay.period_secs);
        if let Err(e) = stage.update(dt, period_secs) {
            toaster.notify(Notice::error("Playback stopped").with_description(e.to_string()));
        }
        toaster.update(dt);

        // --- Draw ---
        let layout = PanelLayout::new(rl.get_screen_width() as f32, rl.get_screen_height() as f32);
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLANK);
        render::draw_scene(&mut d, &scene, &layout, stage.layer(), &toaster);
    }

    info!("window closed");
    Ok(())
}
