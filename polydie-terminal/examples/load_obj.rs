/// Example: Load an OBJ file, print its die numbering, then view it
///
/// Usage: cargo run --example load_obj -- path/to/file.obj
use anyhow::{Context, Result};
use polydie_core::{label_polyhedron, obj, pair_faces, solids, LabelPolicy};
use polydie_terminal::{LoadedModel, SceneKind, TerminalApp, ViewerConfig};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let model = match args.get(1) {
        Some(path) => {
            println!("Loading OBJ file: {path}");
            let poly = obj::load_obj(path).with_context(|| format!("failed to load {path}"))?;
            LoadedModel {
                name: path.clone(),
                poly,
            }
        }
        None => {
            eprintln!("Usage: {} <obj-file>", args[0]);
            eprintln!("\nNo OBJ file provided, using the icosahedron...");
            LoadedModel {
                name: "icosahedron".to_string(),
                poly: solids::icosahedron(),
            }
        }
    };

    let pairing = pair_faces(&model.poly);
    let labeling = label_polyhedron(&model.poly, LabelPolicy::OppositeSum)?;
    println!(
        "Loaded {} faces, {} vertices",
        model.poly.face_count(),
        model.poly.vertex_count()
    );
    for (i, j) in pairing.pairs() {
        println!(
            "  faces {i:>3} and {j:>3}: {:>3} + {:>3}",
            labeling.label(i),
            labeling.label(j)
        );
    }
    for i in pairing.fixed_points() {
        println!("  face {i:>3} has no partner: {:>3}", labeling.label(i));
    }

    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(SceneKind::Model, Some(model), ViewerConfig::default())?;
    app.run()?;

    Ok(())
}
