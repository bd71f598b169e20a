//! `orbitview [SCENE] [TEXTURE] [--options FILE.toml]`
//!
//! Opens a window showing SCENE (a `.gltf` or `.glb` file) painted with
//! TEXTURE. Omitted arguments fall back to the options file, then to the
//! built-in defaults. Set `RUST_LOG=debug` for loader details.

use std::path::PathBuf;

use orbitview::{Options, OrbitViewError, Viewer};

const USAGE: &str = "usage: orbitview [SCENE] [TEXTURE] [--options FILE.toml]";

/// Parsed command line.
#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    scene: Option<String>,
    texture: Option<String>,
    options: Option<PathBuf>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--options" | "-o" => {
                let path = args
                    .next()
                    .ok_or_else(|| format!("{arg} needs a file\n{USAGE}"))?;
                parsed.options = Some(PathBuf::from(path));
            }
            flag if flag.starts_with('-') => {
                return Err(format!("unknown flag {flag}\n{USAGE}"));
            }
            _ if parsed.scene.is_none() => parsed.scene = Some(arg),
            _ if parsed.texture.is_none() => parsed.texture = Some(arg),
            _ => return Err(format!("unexpected argument {arg}\n{USAGE}")),
        }
    }
    Ok(parsed)
}

fn run(args: Args) -> Result<(), OrbitViewError> {
    let options = match &args.options {
        Some(path) => {
            log::info!("options from {}", path.display());
            Options::load(path)?
        }
        None => Options::default(),
    };

    let mut builder = Viewer::builder().with_options(options);
    if let Some(scene) = args.scene {
        builder = builder.with_scene(scene);
    }
    if let Some(texture) = args.texture {
        builder = builder.with_texture(texture);
    }
    builder.build().run()
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            log::error!("{msg}");
            std::process::exit(2);
        }
    };

    if let Err(e) = run(args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, String> {
        parse_args(args.iter().map(|s| (*s).to_owned()))
    }

    #[test]
    fn positional_scene_and_texture() {
        let args = parse(&["model.glb", "skin.png"]).unwrap();
        assert_eq!(args.scene.as_deref(), Some("model.glb"));
        assert_eq!(args.texture.as_deref(), Some("skin.png"));
        assert_eq!(args.options, None);
    }

    #[test]
    fn options_flag_anywhere() {
        let args = parse(&["--options", "preset.toml", "model.glb"]).unwrap();
        assert_eq!(args.options, Some(PathBuf::from("preset.toml")));
        assert_eq!(args.scene.as_deref(), Some("model.glb"));
        assert_eq!(args.texture, None);
    }

    #[test]
    fn no_arguments_means_defaults() {
        assert_eq!(parse(&[]).unwrap(), Args::default());
    }

    #[test]
    fn bad_arguments_are_rejected() {
        assert!(parse(&["--options"]).is_err());
        assert!(parse(&["--fullscreen"]).is_err());
        assert!(parse(&["a.glb", "b.png", "c"]).is_err());
    }
}
