#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use anyhow::{Context, Result};
use clap::Parser;

use tabsheet::cli::{CliArgs, OutputFormat, SessionSource, StartupConfig};
use tabsheet::config::SheetConfig;
use tabsheet::messages::{Msg, PersistMsg};
use tabsheet::model::AppModel;
use tabsheet::panel::{EventLog, PanelEvent};
use tabsheet::runtime::{FrameLoop, Script};

fn load_script(source: &SessionSource) -> Result<Script> {
    match source {
        SessionSource::Demo => Script::demo().context("built-in demo session is malformed"),
        SessionSource::File(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read script {}", path.display()))?;
            Script::from_yaml(&content)
                .with_context(|| format!("failed to parse script {}", path.display()))
        }
    }
}

fn restore_state(frame_loop: &mut FrameLoop, startup: &StartupConfig, max_frames: usize) -> Result<()> {
    if !startup.should_restore() {
        return Ok(());
    }
    let Some(path) = &startup.state_file else {
        return Ok(());
    };
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read state file {}", path.display()))?;
    tracing::info!("Restoring panel state from {}", path.display());
    frame_loop.dispatch(Msg::Persist(PersistMsg::Restore(bytes)));
    frame_loop.run_until_idle(max_frames);
    Ok(())
}

fn print_events(events: &[PanelEvent], output: OutputFormat) -> Result<()> {
    for event in events {
        match output {
            OutputFormat::JsonLines => {
                println!("{}", serde_json::to_string(event).context("failed to encode event")?)
            }
            OutputFormat::Text => match event {
                PanelEvent::StateChanged { panel, state } => println!("{panel} state  {state}"),
                PanelEvent::Slide { panel, offset } => println!("{panel} slide  {offset:.3}"),
            },
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    tabsheet::tracing::init();

    let startup = CliArgs::parse()
        .into_config()
        .map_err(anyhow::Error::msg)?;
    let config = SheetConfig::load();
    let max_frames = config.max_frames;
    let script = load_script(&startup.session)?;

    let mut model = AppModel::new(config);
    let log = EventLog::new();
    model.add_listener(Box::new(log.clone()))?;

    let mut frame_loop = FrameLoop::new(model);
    if let Some(path) = &startup.state_file {
        frame_loop = frame_loop.with_state_file(path);
    }

    restore_state(&mut frame_loop, &startup, max_frames)?;
    script.run(&mut frame_loop, max_frames);
    print_events(&log.drain(), startup.output)?;

    // Persist whatever the session ended in
    frame_loop.dispatch(Msg::Persist(PersistMsg::Save));

    let model = frame_loop.model();
    tracing::info!(
        state = ?model.state(),
        top = ?model.panel_top(),
        frames = frame_loop.frames(),
        "session finished"
    );
    if startup.output == OutputFormat::Text {
        let state = model
            .state()
            .map_or_else(|| "detached".to_string(), |state| state.to_string());
        println!(
            "final: {state} at top {} after {} frames",
            model.panel_top().unwrap_or_default(),
            frame_loop.frames()
        );
    }

    Ok(())
}
