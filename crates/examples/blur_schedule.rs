//! Schedules the Gaussian blur for a split-screen frame and prints the graph
//!
//! Usage:
//!   blur_schedule [config.json]
//!
//! Run with `RUST_LOG=debug` to see every emitted pass.

use helio_blur::prelude::*;

fn load_config() -> Result<BlurConfig> {
    match std::env::args().nth(1) {
        None => Ok(BlurConfig::default()),
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("{}: {}", path, e)))?;
            serde_json::from_str(&text).map_err(|e| Error::Config(format!("{}: {}", path, e)))
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut chain = PassChain::builder()
        .with_pass("ForwardPass", &["ForwardColor", "ForwardDepth"])
        .with_pass("BlitScreenPass", &[])
        .build()?;
    chain.insert(helio_blur::blur::registration())?;
    log::info!("Post-process chain: {:?}", chain.names().collect::<Vec<_>>());

    let forward = chain
        .get("ForwardPass")
        .map(StageOutputs::from_registration)
        .ok_or_else(|| Error::Graph("ForwardPass missing from chain".to_string()))?;

    let config = load_config()?;
    let settings = GaussianBlurSettings::from_config(&config, Some(EffectAsset::gaussian_blur()))?;

    let mut cameras = CameraRegistry::new();
    let views = [
        cameras.register(CameraHandle(1), Rect::new(0.0, 0.0, 0.5, 1.0), 1920, 1080),
        cameras.register(CameraHandle(2), Rect::new(0.5, 0.0, 0.5, 1.0), 1920, 1080),
    ];

    let policy = DebugViewPolicy::default();
    let mut blur = GaussianBlurPass::new();
    let mut graph = FrameGraph::new();

    for camera in &views {
        blur.render(camera, &settings, &forward, &policy, &mut graph)?;
    }
    graph.build()?;

    for (step, &idx) in graph.execution_order().iter().enumerate() {
        let pass = &graph.passes()[idx];
        let inputs: Vec<_> = pass.reads().collect();
        let outputs: Vec<_> = pass.writes().collect();
        println!(
            "{:2}: {:<10} {:?} -> {:?} (subpass {:?})",
            step, pass.name, inputs, outputs, pass.subpass
        );
    }
    for camera in &views {
        println!("camera {} output: {}", camera.unique_id(), blur.output_slot(camera));
    }

    Ok(())
}
