use anyhow::Result;
use renderer::{Renderer, RendererConfig};
use tracing_subscriber::EnvFilter;

use crate::cli::Args;

pub fn run(args: Args) -> Result<()> {
    initialise_tracing();

    let config = renderer_config(args);
    tracing::info!(title = %config.title, "bootstrapping shadercycle");
    let mut renderer = Renderer::new(config);
    renderer.run()
}

fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn renderer_config(args: Args) -> RendererConfig {
    RendererConfig {
        surface_size: args.size,
        title: args.title,
        gpu_power: args.gpu_power,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use renderer::GpuPowerPreference;

    #[test]
    fn default_args_reproduce_default_config() {
        let args = Args::try_parse_from(["shadercycle"]).unwrap();
        let config = renderer_config(args);
        let expected = RendererConfig::default();
        assert_eq!(config.surface_size, expected.surface_size);
        assert_eq!(config.title, expected.title);
        assert_eq!(config.gpu_power, expected.gpu_power);
    }

    #[test]
    fn flags_flow_into_config() {
        let args = Args::try_parse_from([
            "shadercycle",
            "--size",
            "640x480",
            "--gpu-power",
            "low",
            "--title",
            "demo",
        ])
        .unwrap();
        let config = renderer_config(args);
        assert_eq!(config.surface_size, (640, 480));
        assert_eq!(config.gpu_power, GpuPowerPreference::Low);
        assert_eq!(config.title, "demo");
    }
}
