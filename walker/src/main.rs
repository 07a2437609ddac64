mod camera;
mod config;
mod render;
mod schedule;
mod skeleton;

use {
    crate::{config::Config, render::TraceRenderer, schedule::RealTimeScheduler},
    animate::FrameDriver,
    color_eyre::Report,
    tracing_error::ErrorLayer,
    tracing_subscriber::{fmt, layer::SubscriberExt as _, EnvFilter},
};

fn main() -> Result<(), Report> {
    color_eyre::install()?;

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .with(ErrorLayer::default());
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::load_default()?;
    tracing::debug!("Config {:#?}", config);

    let mut rig = config.build_rig()?;
    for issue in rig.validate() {
        tracing::warn!("Rig topology: {}", issue);
    }

    for joint in rig.joints.joints() {
        tracing::debug!(
            "Joint drives '{}'",
            rig.segment_name(joint.segment()).unwrap_or("<missing>")
        );
    }

    let mut renderer = TraceRenderer::new(config.camera.into_camera(), &rig)
        .with_report_interval(config.report_every);
    let mut scheduler = RealTimeScheduler::new(config.frame_rate, config.frames);
    let mut driver = FrameDriver::new(config.time_step);

    let ticks = driver.run(&mut rig, &mut renderer, &mut scheduler);
    debug_assert_eq!(ticks, scheduler.ticks());
    tracing::info!(
        "Walked {} frames, {} segment draws, average tick {:?}",
        ticks,
        renderer.drawn(),
        driver.timer().average()
    );

    Ok(())
}
