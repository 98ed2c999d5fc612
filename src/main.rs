use anyhow::Context;
use clap::{ArgAction, Parser};
use figure_actions::actions::DrawContours;
use figure_actions::dispatch::{ActionsManager, RedrawCounter};
use figure_actions::trace::Trace;
use figure_actions::Config;
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Parser, Debug)]
#[command(name = "figure-actions")]
#[command(version, about = "Replay pointer traces through plot gesture bindings")]
struct Cli {
    /// Trace file (TOML) with the bindings and events to replay
    #[arg(long, short = 't', value_name = "FILE")]
    trace: Option<PathBuf>,

    /// Config file to use instead of ~/.config/figure-actions/config.toml
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Edge band width as a fraction of the axes (overrides config)
    #[arg(long, value_name = "F")]
    edge_fraction: Option<f64>,

    /// Click/drag delay in seconds (overrides config)
    #[arg(long, value_name = "SECONDS")]
    delay: Option<f64>,

    /// Also register the contour drawing action with its configured triggers
    #[arg(long, action = ArgAction::SetTrue)]
    draw_contours: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let Some(trace_path) = cli.trace else {
        println!("figure-actions: Replay pointer traces through plot gesture bindings");
        println!();
        println!("Usage:");
        println!("  figure-actions --trace FILE                Replay a trace and print dispatches");
        println!("  figure-actions --trace FILE --draw-contours Include the contour drawing action");
        println!("  figure-actions --help                      Show help");
        println!();
        println!("Each dispatch is printed as: <time>s (<zone>, <button>, <gesture>) -> <handler>");
        return Ok(());
    };

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(fraction) = cli.edge_fraction {
        config.interaction.edge_fraction = fraction;
    }
    if let Some(delay) = cli.delay {
        config.interaction.delay_seconds = delay;
    }
    config.validate_and_clamp();

    let trace = Trace::load(&trace_path)?;
    log::info!(
        "Replaying {} event(s) against {} binding(s)",
        trace.events.len(),
        trace.bindings.len()
    );

    let host = Rc::new(RedrawCounter::new());
    let mut manager = ActionsManager::from_config(&host, &config.interaction);
    manager
        .register(trace.recorder())
        .context("Failed to register trace bindings")?;
    if cli.draw_contours {
        manager
            .register(DrawContours::new(&config.contours))
            .context("Failed to register contour drawing")?;
    }

    let records = trace.replay(&mut manager)?;
    for record in &records {
        println!(
            "{:.3}s {} -> {}",
            record.time.as_secs_f64(),
            record.dispatch.trigger,
            record.dispatch.handler
        );
    }

    if let Some(contours) = manager.action::<DrawContours>(DrawContours::NAME) {
        let mut axes: Vec<usize> = trace.events.iter().filter_map(|e| e.axes).collect();
        axes.push(0);
        axes.sort_unstable();
        axes.dedup();
        for index in axes {
            println!(
                "axes {}: {} point(s), {} contour(s)",
                index,
                contours.points(index).len(),
                contours.contours(index).len()
            );
        }
    }

    log::info!(
        "{} dispatch(es), {} redraw request(s)",
        records.len(),
        host.count()
    );
    Ok(())
}
