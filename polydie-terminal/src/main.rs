/// Polydie terminal viewer
///
/// Usage: polydie-terminal [dice|wire|orrery|model <file.obj>]
///
/// Controls:
///   - 1-5: Tetrahedron, cube, octahedron, dodecahedron, icosahedron
///   - Tab: Next scene
///   - WASD / Arrow Keys: Rotate (Up/Down tilt the orrery)
///   - E/R: Roll rotation
///   - Space: Pause the animation
///   - Q/ESC/Enter: Quit
use anyhow::{bail, Context, Result};
use polydie_core::obj;
use polydie_terminal::{LoadedModel, SceneKind, TerminalApp, ViewerConfig};
use std::env;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (kind, model) = match args.as_slice() {
        [] => (SceneKind::Dice, None),
        [path] if path.ends_with(".obj") => (SceneKind::Model, Some(load(path)?)),
        [name] => (scene_kind(name)?, None),
        [name, path] => (scene_kind(name)?, Some(load(path)?)),
        _ => bail!("usage: polydie-terminal [dice|wire|orrery|model <file.obj>]"),
    };

    let mut app = TerminalApp::new(kind, model, ViewerConfig::default())?;
    app.run()?;

    Ok(())
}

fn scene_kind(name: &str) -> Result<SceneKind> {
    SceneKind::parse(name).with_context(|| format!("unknown scene {name:?}"))
}

fn load(path: &str) -> Result<LoadedModel> {
    let path = Path::new(path);
    let poly = obj::load_obj(path).with_context(|| format!("failed to load {}", path.display()))?;
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "model".to_string());
    Ok(LoadedModel { name, poly })
}
