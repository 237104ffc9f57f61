use clap::Parser;
use renderer::GpuPowerPreference;

#[derive(Parser, Debug)]
#[command(
    name = "shadercycle",
    author,
    version,
    about = "Cycles plasma, scrolling colours and moire circles in a shader window"
)]
pub struct Args {
    /// Initial window size (e.g. `1280x720`).
    #[arg(
        long,
        value_name = "WIDTHxHEIGHT",
        value_parser = parse_surface_size,
        default_value = "1280x720"
    )]
    pub size: (u32, u32),

    /// Adapter power preference: `low` or `high`.
    #[arg(
        long,
        value_name = "PREFERENCE",
        value_parser = parse_gpu_power,
        default_value = "high"
    )]
    pub gpu_power: GpuPowerPreference,

    /// Window title.
    #[arg(long, default_value = "shadercycle")]
    pub title: String,
}

pub fn parse() -> Args {
    Args::parse()
}

pub fn parse_surface_size(value: &str) -> Result<(u32, u32), String> {
    let trimmed = value.trim();
    let (width, height) = trimmed
        .split_once(['x', 'X', '×'])
        .ok_or_else(|| "expected WxH format, e.g. 1280x720".to_string())?;

    let width: u32 = width
        .trim()
        .parse()
        .map_err(|_| format!("invalid width '{}' in window size", width.trim()))?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|_| format!("invalid height '{}' in window size", height.trim()))?;

    if width == 0 || height == 0 {
        return Err("window dimensions must be greater than zero".to_string());
    }

    Ok((width, height))
}

pub fn parse_gpu_power(value: &str) -> Result<GpuPowerPreference, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("gpu power preference must not be empty".to_string());
    }

    match trimmed.to_ascii_lowercase().as_str() {
        "low" | "low-power" | "integrated" => Ok(GpuPowerPreference::Low),
        "high" | "high-performance" | "discrete" => Ok(GpuPowerPreference::High),
        other => Err(format!(
            "unknown gpu power preference '{other}'; expected low or high"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_surface_sizes() {
        assert_eq!(parse_surface_size("1920x1080"), Ok((1920, 1080)));
        assert_eq!(parse_surface_size(" 800 X 600 "), Ok((800, 600)));
        assert_eq!(parse_surface_size("640×480"), Ok((640, 480)));
    }

    #[test]
    fn rejects_bad_surface_sizes() {
        assert!(parse_surface_size("1920").is_err());
        assert!(parse_surface_size("0x600").is_err());
        assert!(parse_surface_size("widexhigh").is_err());
    }

    #[test]
    fn parses_gpu_power() {
        assert_eq!(parse_gpu_power("LOW"), Ok(GpuPowerPreference::Low));
        assert_eq!(parse_gpu_power("discrete"), Ok(GpuPowerPreference::High));
        assert!(parse_gpu_power("medium").is_err());
        assert!(parse_gpu_power("").is_err());
    }

    #[test]
    fn defaults_match_fixed_demo() {
        let args = Args::try_parse_from(["shadercycle"]).unwrap();
        assert_eq!(args.size, (1280, 720));
        assert_eq!(args.gpu_power, GpuPowerPreference::High);
        assert_eq!(args.title, "shadercycle");
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
