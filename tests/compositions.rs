use anyhow::Result;
use serde_json::json;

use estate_motion::engine::registry::{Composition, REGISTRY};
use estate_motion::engine::scenes::{BeforeAfter, Pain, Scene, SceneContext};
use estate_motion::engine::theme::Theme;
use estate_motion::engine::Engine;
use estate_motion::renderer::Renderer;
use estate_motion::types::{Clip, NodeKind, VisualNode};

fn build(id: &str) -> Result<Composition> {
    Ok(Composition::build(id, None, Theme::default())?)
}

fn opacity_of(root: &VisualNode, name: &str) -> f64 {
    root.find_with_opacity(name).map_or(0.0, |(_, o)| o)
}

/// Text nodes with a visible effective opacity.
fn visible_text(root: &VisualNode) -> Vec<String> {
    let mut out = Vec::new();
    root.walk(&mut |node, opacity| {
        if let NodeKind::Text(t) = &node.kind {
            if opacity > 0.01 {
                out.push(t.content.clone());
            }
        }
    });
    out
}

#[test]
fn sales_video_opens_on_the_letterbox() -> Result<()> {
    let video = build("SalesVideo30Dias")?;
    let tree = Engine::evaluate(&video, 0);
    assert_eq!(video.locate(0), vec![("hook", 0)]);
    assert_eq!(opacity_of(&tree.root, "hook.bar.top"), 1.0);
    assert_eq!(opacity_of(&tree.root, "hook.bar.bottom"), 1.0);
    assert!(opacity_of(&tree.root, "hook.pill") < 0.05);
    assert!(visible_text(&tree.root).is_empty(), "{:?}", visible_text(&tree.root));
    Ok(())
}

#[test]
fn sales_video_counts_months_inside_pain() -> Result<()> {
    let video = build("SalesVideo30Dias")?;
    let tree = Engine::evaluate(&video, 90);
    assert_eq!(video.locate(90), vec![("pain", 15)]);

    let months: i64 = tree
        .root
        .find("pain.months")
        .expect("months counter mounted")
        .text_content()
        .parse()?;
    assert!(months > 0 && months < 6, "{months}");
    assert!(tree.root.find("promise.days").is_none());
    Ok(())
}

#[test]
fn story_card_falls_back_to_placeholder_and_lands_on_price() -> Result<()> {
    let card = Composition::build(
        "PropertyCardStory",
        Some(json!({"price": 4_800_000, "coverPhotoUrl": null})),
        Theme::default(),
    )?;
    assert_eq!((card.config().canvas.width, card.config().canvas.height), (1080, 1920));

    let at_200 = Engine::evaluate(&card, 200).root;
    assert!(at_200.find("card.background.placeholder").is_some());
    assert!(at_200.find("card.background.photo").is_none());

    for frame in [210, 240, 269] {
        let root = Engine::evaluate(&card, frame).root;
        assert_eq!(root.find("card.price").unwrap().text_content(), "$4.8M");
    }
    Ok(())
}

#[test]
fn card_first_frame_is_intro_only() -> Result<()> {
    let inputs = [
        json!({}),
        json!({"title": "Loft", "price": 500, "operationType": "rent"}),
        json!({"coverPhotoUrl": "https://cdn.example/loft.jpg", "areaM2": null, "parkingSpaces": 0}),
    ];
    for props in inputs {
        for id in ["PropertyCard", "PropertyCardStory"] {
            let card = Composition::build(id, Some(props.clone()), Theme::default())?;
            let root = Engine::evaluate(&card, 0).root;
            let logo = root.find("card.logo").unwrap();
            assert!(logo.layer.scale < 1.0);
            assert!(opacity_of(&root, "card.logo") < 1.0);
            assert!(root.find("card.title").is_none());
            assert!(root.find("card.price").is_none());
        }
    }
    Ok(())
}

#[test]
fn before_after_midpoint_inside_the_video() -> Result<()> {
    let video = build("SalesVideo30Dias")?;
    let start = video
        .locate(560)
        .into_iter()
        .find(|(name, _)| *name == "before_after")
        .map(|(_, local)| 560 - local)
        .unwrap();
    let mid = start + BeforeAfter::WIPE_MIDPOINT;
    let root = Engine::evaluate(&video, mid).root;

    let after = root.find("before_after.after").unwrap();
    let Some(Clip::Inset { right, .. }) = after.layer.clip else {
        panic!("after image is not clipped");
    };
    let revealed = 100.0 - right;
    assert!((revealed - 50.0).abs() < 0.5, "{revealed}");

    let divider = root.find("before_after.divider").unwrap();
    let line_w = match &divider.children()[0].kind {
        NodeKind::Shape(s) => s.width,
        other => panic!("unexpected divider {other:?}"),
    };
    let ctx = SceneContext::new(video.config().canvas, video.config().fps, Theme::default());
    let (panel_w, _) = BeforeAfter::panel_size(&ctx);
    let boundary = panel_w * revealed / 100.0;
    assert!((divider.offset.x + line_w / 2.0 - boundary).abs() <= 1.0);
    Ok(())
}

#[test]
fn scenes_render_the_same_inside_the_video() -> Result<()> {
    let video = build("SalesVideo30DiasVertical")?;
    let ctx = SceneContext::new(video.config().canvas, video.config().fps, Theme::default());
    for global in [80, 120, 190] {
        let local = video
            .locate(global)
            .into_iter()
            .find(|(name, _)| *name == "pain")
            .map(|(_, local)| local)
            .unwrap();
        let root = Engine::evaluate(&video, global).root;
        let wrapped = root.find("series.pain").unwrap();
        assert_eq!(wrapped.children()[0], Pain.render(local, &ctx), "global {global}");
    }
    Ok(())
}

#[test]
fn orientations_share_one_timeline() -> Result<()> {
    let wide = build("SalesVideo30Dias")?;
    let tall = build("SalesVideo30DiasVertical")?;
    assert_eq!(wide.duration(), tall.duration());
    for frame in (0..wide.duration()).step_by(37) {
        assert_eq!(wide.locate(frame), tall.locate(frame));
        let mut a = Vec::new();
        let mut b = Vec::new();
        Engine::evaluate(&wide, frame).root.walk(&mut |n, _| a.extend(n.name.clone()));
        Engine::evaluate(&tall, frame).root.walk(&mut |n, _| b.extend(n.name.clone()));
        assert_eq!(a, b, "frame {frame}");
    }
    Ok(())
}

#[test]
fn evaluation_is_deterministic() -> Result<()> {
    for reg in REGISTRY {
        let first = build(reg.id)?;
        let second = build(reg.id)?;
        for frame in [0, 45, 133, first.duration() - 1] {
            let a = serde_json::to_string(&Engine::evaluate(&first, frame))?;
            let b = serde_json::to_string(&Engine::evaluate(&second, frame))?;
            assert_eq!(a, b, "{} frame {frame}", reg.id);
        }
    }
    Ok(())
}

#[test]
fn manifest_is_readable_by_a_driver() -> Result<()> {
    let card = build("PropertyCard")?;
    let manifest = Renderer::render_parallel(&card, 0..60, 4);
    assert_eq!(Renderer::render(&card, 0..60), manifest);

    let json = serde_json::to_string(&manifest)?;
    let read: estate_motion::types::RenderManifest = serde_json::from_str(&json)?;
    assert_eq!(read.frames.len(), 60);
    assert_eq!((read.width, read.height, read.fps), (1080, 1080, 30));
    Ok(())
}
