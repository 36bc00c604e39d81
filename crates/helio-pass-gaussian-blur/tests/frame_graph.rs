use helio_frame_graph::{Error, FrameGraph, LoadOp, PassChain, Rect, ResourceLifetime, CLEAR_BLACK};
use helio_pass_gaussian_blur::{
    BlurMode, CameraHandle, CameraRegistry, DebugViewPolicy, EffectAsset, GaussianBlurPass,
    GaussianBlurSettings, SlotSource, StageOutputs,
};
use std::sync::Arc;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn forward() -> StageOutputs {
    StageOutputs::new("ForwardPass", &["ForwardColor", "ForwardDepth"])
}

fn blur_settings(iterations: u32) -> GaussianBlurSettings {
    GaussianBlurSettings::new()
        .with_iterations(iterations)
        .with_radius(4.0)
        .with_effect(EffectAsset::gaussian_blur())
}

#[test]
fn registration_places_blur_before_blit() {
    init_logging();
    let mut chain = PassChain::builder()
        .with_pass("ForwardPass", &["ForwardColor", "ForwardDepth"])
        .with_pass("BlitScreenPass", &[])
        .build()
        .unwrap();
    chain.insert(helio_pass_gaussian_blur::registration()).unwrap();

    let names: Vec<_> = chain.names().collect();
    assert_eq!(names, ["ForwardPass", "GaussianBlurPass", "BlitScreenPass"]);

    let blur_outputs = StageOutputs::from_registration(chain.get("GaussianBlurPass").unwrap());
    let mut cameras = CameraRegistry::new();
    let cam = cameras.register(CameraHandle(0), Rect::FULL, 800, 600);
    assert_eq!(blur_outputs.slot_name(&cam, 0), GaussianBlurPass::new().output_slot(&cam));
}

#[test]
fn two_cameras_build_a_valid_graph() {
    init_logging();
    let mut cameras = CameraRegistry::new();
    let left = cameras.register(CameraHandle(100), Rect::new(0.0, 0.0, 0.5, 1.0), 1600, 900);
    let right = cameras.register(CameraHandle(200), Rect::new(0.5, 0.0, 0.5, 1.0), 1600, 900);

    let settings = blur_settings(3);
    let policy = DebugViewPolicy::default();
    let mut blur = GaussianBlurPass::new();
    let mut graph = FrameGraph::new();

    blur.render(&left, &settings, &forward(), &policy, &mut graph).unwrap();
    blur.render(&right, &settings, &forward(), &policy, &mut graph).unwrap();
    graph.build().unwrap();

    assert_eq!(graph.passes().len(), 12);
    assert_eq!(graph.execution_order().len(), 12);

    // every pass runs after the pass producing its input
    let position = |idx: usize| graph.execution_order().iter().position(|&p| p == idx).unwrap();
    for (i, pass) in graph.passes().iter().enumerate() {
        for input in pass.reads() {
            if let Some(writer) = (0..i).rev().find(|&w| graph.passes()[w].writes().any(|o| o == input)) {
                assert!(position(writer) < position(i), "{} ran before its input", pass.name);
            }
        }
        assert!(pass.outputs.iter().all(|o| o.load == LoadOp::Clear(CLEAR_BLACK)));
    }

    let left_tmp = blur.temp_slot(&left);
    let right_tmp = blur.temp_slot(&right);
    assert_ne!(left_tmp, right_tmp);
    assert_eq!(
        graph.resource_lifetime(&left_tmp),
        Some(ResourceLifetime { first_use: position(0), last_use: position(5) })
    );

    let right_viewport = graph.passes()[6].viewport.unwrap();
    assert_eq!((right_viewport.x, right_viewport.width), (800, 800));
}

#[test]
fn auxiliary_mode_reads_the_depth_slot_directly() {
    init_logging();
    let mut cameras = CameraRegistry::new();
    let cam = cameras.register(CameraHandle(1), Rect::FULL, 640, 480);
    let settings = blur_settings(0).with_mode(BlurMode::AuxiliaryOnly);

    let mut blur = GaussianBlurPass::new();
    let mut graph = FrameGraph::new();
    blur.render(&cam, &settings, &forward(), &DebugViewPolicy::default(), &mut graph)
        .unwrap();
    graph.build().unwrap();

    let passes = graph.passes();
    assert_eq!(passes.len(), 1);
    assert_eq!(passes[0].inputs[0].0, forward().slot_name(&cam, 1));
    assert_eq!(passes[0].inputs[0].1, "outputResultMap");
    assert_eq!(passes[0].subpass, Some(1));
}

#[test]
fn single_subpass_effect_faults_the_frame() {
    init_logging();
    let mut cameras = CameraRegistry::new();
    let cam = cameras.register(CameraHandle(1), Rect::FULL, 640, 480);
    let settings = GaussianBlurSettings::new()
        .with_iterations(2)
        .with_effect(Arc::new(EffectAsset::new("copy", &["copy"])));

    let mut graph = FrameGraph::new();
    let result = GaussianBlurPass::new().render(
        &cam,
        &settings,
        &forward(),
        &DebugViewPolicy::default(),
        &mut graph,
    );

    assert!(matches!(result, Err(Error::Shader(_))));
    // the vertical pass stays open, so the frame cannot be built
    assert!(graph.build().is_err());
}

#[test]
fn disabled_blur_leaves_graph_empty() {
    init_logging();
    let mut cameras = CameraRegistry::new();
    let cam = cameras.register(CameraHandle(1), Rect::FULL, 640, 480);
    let mut settings = blur_settings(3);
    settings.set_effect(None);

    let mut graph = FrameGraph::new();
    GaussianBlurPass::new()
        .render(&cam, &settings, &forward(), &DebugViewPolicy::default(), &mut graph)
        .unwrap();
    graph.build().unwrap();
    assert!(graph.passes().is_empty());
}
