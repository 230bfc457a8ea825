// Host-side tests driving whole pages through the choreographer with a
// recording stage.

use folio_core::bubbles::{skill_indices, BubbleLayoutCache};
use folio_core::constants::SECTION_RETRY_ATTEMPTS;
use folio_core::handoff::{BlobSignal, SignalBus};
use folio_core::layout::{slot_position, SkillsLayout};
use folio_core::sections::projects::{contact_target, projects_target};
use folio_core::sections::{AboutPhase, SkillsController};
use folio_core::stage::SceneContext;
use folio_core::{
    BlobGeometry, ChoreoError, Choreographer, ElementId, Frame, Measurements, NavSection,
    RecordingStage, Rect, Size, Viewport,
};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

fn near(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-2
}

fn desktop_page() -> Measurements {
    Measurements {
        scroll_y: 0.0,
        about_top: Some(800.0),
        about_blob: Some(Size::new(600.0, 400.0)),
        about_blob_top: Some(1000.0),
        profile_photo: Some(Rect::new(200.0, 900.0, 300.0, 300.0)),
        mobile_jellies: None,
        skills_top: Some(4000.0),
        skills_bottom: Some(9000.0),
        skills_blob: Some(Size::new(600.0, 400.0)),
        projects_top: Some(9500.0),
        projects_blob: Some(Size::new(600.0, 400.0)),
        project_cards: Some(Rect::new(100.0, 9700.0, 1240.0, 600.0)),
        projects_title_margin: Some(16.0),
        contact_top: Some(11000.0),
        contact_bottom: Some(12000.0),
        contact_card: Some(Rect::new(100.0, 11200.0, 600.0, 600.0)),
        contact_blob: Some(Size::new(600.0, 400.0)),
    }
}

fn mobile_page() -> Measurements {
    Measurements {
        scroll_y: 0.0,
        about_top: Some(700.0),
        about_blob: Some(Size::new(318.75, 212.5)),
        about_blob_top: Some(1000.0),
        profile_photo: None,
        mobile_jellies: Some(Rect::new(20.0, 750.0, 335.0, 120.0)),
        skills_top: Some(3000.0),
        skills_bottom: Some(8000.0),
        skills_blob: None,
        projects_top: Some(8600.0),
        projects_blob: None,
        project_cards: Some(Rect::new(16.0, 8800.0, 343.0, 900.0)),
        projects_title_margin: None,
        contact_top: Some(10500.0),
        contact_bottom: Some(11500.0),
        contact_card: Some(Rect::new(16.0, 10600.0, 343.0, 500.0)),
        contact_blob: None,
    }
}

fn scroll_to(choreo: &mut Choreographer, stage: &mut RecordingStage, from: f32, to: f32) {
    let step = if to >= from { 25.0 } else { -25.0 };
    let mut s = from;
    while (step > 0.0 && s < to) || (step < 0.0 && s > to) {
        choreo.on_scroll(Frame::new(s, 0.0), stage);
        s += step;
    }
    choreo.on_scroll(Frame::new(to, 0.0), stage);
}

#[test]
fn about_centers_and_morphs_at_1440x900() {
    let vp = Viewport::new(1440.0, 900.0);
    let mut choreo = Choreographer::new(vp, desktop_page());
    let mut stage = RecordingStage::new();

    choreo.on_scroll(Frame::new(0.0, 0.0), &mut stage);
    let blob = stage.get(ElementId::AboutBlob);
    assert_eq!((blob.x, blob.y), (Some(-50.0), Some(1220.0)));
    assert_eq!(blob.scale, Some(1.0));
    assert_eq!(blob.opacity, Some(1.0));
    assert_eq!(
        stage.source(ElementId::AboutBlob),
        Some("assets/3d_shape/01.webp")
    );

    // Halfway through centering.
    choreo.on_scroll(Frame::new(1100.0, 0.0), &mut stage);
    let blob = stage.get(ElementId::AboutBlob);
    assert!(approx(blob.x.unwrap(), 185.0));
    assert!(approx(blob.y.unwrap(), 760.0));
    assert!(approx(blob.scale.unwrap(), 1.475));

    // Halfway through the morph: centered, frame 13.
    choreo.on_scroll(Frame::new(2125.0, 0.0), &mut stage);
    let blob = stage.get(ElementId::AboutBlob);
    assert_eq!((blob.x, blob.y), (Some(420.0), Some(300.0)));
    assert!(approx(blob.scale.unwrap(), 1.95));
    assert_eq!(
        stage.source(ElementId::AboutBlob),
        Some("assets/3d_shape/13.webp")
    );
    let about = choreo.about().unwrap();
    assert_eq!(about.centered_pose().scale, choreo.geometry().scale(&vp));

    // Skills top reaches the center: hidden; back up: shown again.
    choreo.on_scroll(Frame::new(3600.0, 0.0), &mut stage);
    assert_eq!(stage.opacity(ElementId::AboutBlob), Some(0.0));
    assert_eq!(
        stage.source(ElementId::AboutBlob),
        Some("assets/3d_shape/25.webp")
    );
    choreo.on_scroll(Frame::new(3000.0, 0.0), &mut stage);
    assert_eq!(stage.opacity(ElementId::AboutBlob), Some(1.0));
}

#[test]
fn about_starts_hidden_when_loaded_past_skills() {
    let mut choreo = Choreographer::new(Viewport::new(1440.0, 900.0), desktop_page());
    let mut stage = RecordingStage::new();
    choreo.on_scroll(Frame::new(5000.0, 0.0), &mut stage);
    assert_eq!(stage.opacity(ElementId::AboutBlob), Some(0.0));
}

#[test]
fn skills_phases_on_mobile_375x812() {
    let vp = Viewport::new(375.0, 812.0);
    let mut choreo = Choreographer::new(vp, mobile_page());
    let mut stage = RecordingStage::new();
    let bubbles = choreo.bubbles().to_vec();
    let skills = skill_indices(&bubbles, true);
    let layout = SkillsLayout::compute(&vp);

    choreo.on_scroll(Frame::new(2000.0, 0.0), &mut stage);
    for i in 0..bubbles.len() {
        let image = stage.get(ElementId::BubbleImage(i));
        assert_eq!(image.opacity, Some(0.0));
        assert_eq!(image.rotation, Some(90.0));
    }
    let first_skill = skills[0];
    assert_eq!(stage.get(ElementId::BubbleIcon(first_skill)).rotation, Some(0.0));
    assert_eq!(stage.opacity(ElementId::BubbleIcon(first_skill)), Some(0.0));
    assert!(stage.source(ElementId::BubbleIcon(first_skill)).is_some());
    assert_eq!(stage.opacity(ElementId::SkillsBlob), Some(0.0));

    // Section top at the center: bubbles appear.
    choreo.on_scroll(Frame::new(2600.0, 0.0), &mut stage);
    assert_eq!(stage.opacity(ElementId::BubbleImage(0)), Some(1.0));

    // Anchor: cluster centered on the layout target, others hidden.
    choreo.on_scroll(Frame::new(3200.0, 0.0), &mut stage);
    let mut top = f32::INFINITY;
    let mut bottom = f32::NEG_INFINITY;
    for (i, b) in bubbles.iter().enumerate() {
        let c = stage.get(ElementId::BubbleContainer(i));
        if b.skill(true).is_some() {
            assert_eq!(c.opacity, Some(1.0));
            assert_eq!(stage.opacity(ElementId::BubbleIcon(i)), Some(1.0));
            top = top.min(c.y.unwrap());
            bottom = bottom.max(c.y.unwrap() + b.size.y);
            assert!(approx(c.x.unwrap(), b.pos.x));
        } else {
            assert_eq!(c.opacity, Some(0.0));
        }
    }
    assert!(approx((top + bottom) / 2.0, layout.cluster_target_center_y()));

    // Start of recollect: bubbles sit in their slots, info fully shown.
    choreo.on_scroll(Frame::new(4094.0, 0.0), &mut stage);
    for (k, &i) in skills.iter().enumerate() {
        let c = stage.get(ElementId::BubbleContainer(i));
        let slot = slot_position(k, bubbles[i].size, &vp, &layout);
        assert!(approx(c.x.unwrap(), slot.x) && approx(c.y.unwrap(), slot.y));
    }
    assert_eq!(stage.opacity(ElementId::SkillInfo), Some(1.0));

    // Reverse morph halfway.
    choreo.on_scroll(Frame::new(5519.0, 0.0), &mut stage);
    let blob = stage.get(ElementId::SkillsBlob);
    assert_eq!(blob.opacity, Some(1.0));
    assert_eq!(blob.rotation, Some(90.0));
    assert!(approx(blob.scale.unwrap(), choreo.geometry().scale(&vp)));
    assert_eq!(
        stage.source(ElementId::SkillsBlob),
        Some("assets/3d_shape/13.webp")
    );
    for i in 0..bubbles.len() {
        assert_eq!(stage.opacity(ElementId::BubbleContainer(i)), Some(0.0));
    }

    // Past the morph: Projects owns the blob.
    choreo.on_scroll(Frame::new(6200.0, 0.0), &mut stage);
    assert_eq!(stage.opacity(ElementId::SkillsBlob), Some(0.0));
    assert!(choreo.projects().unwrap().is_enabled());
    let projects = stage.get(ElementId::ProjectsBlob);
    assert_eq!(projects.opacity, Some(1.0));
    assert_eq!(projects.rotation, Some(90.0));
    assert!(approx(projects.scale.unwrap(), choreo.geometry().scale(&vp)));
    assert!(stage.all_finite());
}

fn desktop_skills() -> (Viewport, BlobGeometry, SkillsController) {
    let vp = Viewport::new(1440.0, 900.0);
    let m = desktop_page();
    let mut g = BlobGeometry::new();
    g.set_initial_dimensions(&vp, 600.0, 400.0);
    let bubbles = BubbleLayoutCache::new().get(&vp, &g).to_vec();
    let ctx = SceneContext {
        viewport: &vp,
        geometry: &g,
        measurements: &m,
    };
    let skills = SkillsController::build(&ctx, &bubbles).unwrap();
    (vp, g, skills)
}

fn sweep(
    skills: &mut SkillsController,
    stage: &mut RecordingStage,
    bus: &mut SignalBus,
    from: f32,
    to: f32,
) -> Vec<BlobSignal> {
    let mut out = Vec::new();
    let step = if to >= from { 25.0 } else { -25.0 };
    let mut s = from;
    loop {
        skills.update(s, stage, bus);
        out.extend(bus.drain());
        if (step > 0.0 && s >= to) || (step < 0.0 && s <= to) {
            break;
        }
        s = if step > 0.0 { (s + step).min(to) } else { (s + step).max(to) };
    }
    out
}

fn handoffs(signals: &[BlobSignal]) -> Vec<folio_core::handoff::BlobHandoff> {
    signals
        .iter()
        .filter_map(|s| match s {
            BlobSignal::HandoffFinished(p) => Some(*p),
            _ => None,
        })
        .collect()
}

#[test]
fn reverse_morph_hands_off_exactly_once() {
    let (vp, g, mut skills) = desktop_skills();
    let mut stage = RecordingStage::new();
    let mut bus = SignalBus::new();

    let signals = sweep(&mut skills, &mut stage, &mut bus, 0.0, 10000.0);
    let payloads = handoffs(&signals);
    assert_eq!(payloads.len(), 1);
    let p = payloads[0];
    assert_eq!(p.scale, g.scale(&vp));
    assert_eq!(p.rotation, 0.0);
    assert_eq!(p.center(), vp.adjusted_center());
    assert_eq!((p.width, p.height), (600.0, 400.0));
    assert!(!signals.contains(&BlobSignal::Reset));
}

#[test]
fn scrolling_back_resets_and_hands_off_again() {
    let (_, _, mut skills) = desktop_skills();
    let mut stage = RecordingStage::new();
    let mut bus = SignalBus::new();

    sweep(&mut skills, &mut stage, &mut bus, 0.0, 9000.0);
    let back = sweep(&mut skills, &mut stage, &mut bus, 9000.0, 5000.0);
    assert_eq!(back.iter().filter(|s| **s == BlobSignal::Reset).count(), 1);
    assert!(handoffs(&back).is_empty());
    assert_eq!(stage.opacity(ElementId::SkillsBlob), Some(0.0));

    let forward = sweep(&mut skills, &mut stage, &mut bus, 5000.0, 9000.0);
    assert_eq!(handoffs(&forward).len(), 1);
}

#[test]
fn jumping_past_the_chain_still_hands_off_once() {
    let (_, _, mut skills) = desktop_skills();
    let mut stage = RecordingStage::new();
    let mut bus = SignalBus::new();
    skills.update(9000.0, &mut stage, &mut bus);
    skills.update(9100.0, &mut stage, &mut bus);
    assert_eq!(handoffs(&bus.drain()).len(), 1);
    assert_eq!(stage.opacity(ElementId::SkillsBlob), Some(0.0));
}

#[test]
fn projects_and_contact_carry_the_blob_on_desktop() {
    let vp = Viewport::new(1440.0, 900.0);
    let mut choreo = Choreographer::new(vp, desktop_page());
    let mut stage = RecordingStage::new();
    let scale = choreo.geometry().scale(&vp);

    scroll_to(&mut choreo, &mut stage, 0.0, 9100.0);
    let blob = stage.get(ElementId::ProjectsBlob);
    assert_eq!(blob.opacity, Some(1.0));
    assert_eq!((blob.x, blob.y), (Some(420.0), Some(300.0)));
    assert!(approx(blob.scale.unwrap(), scale * 0.78));

    scroll_to(&mut choreo, &mut stage, 9100.0, 11600.0);
    let content = stage.get(ElementId::ProjectsContent);
    assert_eq!(content.opacity, Some(1.0));
    assert!(approx(content.y.unwrap(), 100.0 + 10.0 - (180.0 + 16.0)));

    let projects = choreo.projects().unwrap();
    assert!(projects.is_floating());
    let blob = stage.get(ElementId::ProjectsBlob);
    assert!(approx(blob.x.unwrap(), 770.0));
    assert!(approx(blob.y.unwrap(), 250.0));
    assert!(approx(blob.scale.unwrap(), scale * 0.68));

    let form = stage.get(ElementId::ContactForm);
    assert_eq!((form.y, form.opacity), (Some(0.0), Some(1.0)));

    // The float owns y: 0..6px above the settled target.
    choreo.tick(1500.0, &mut stage);
    assert!(approx(stage.get(ElementId::ProjectsBlob).y.unwrap(), 253.0));
    choreo.tick(3000.0, &mut stage);
    assert!(approx(stage.get(ElementId::ProjectsBlob).y.unwrap(), 256.0));
    assert!(choreo.is_animating());
}

#[test]
fn scrolling_back_returns_the_blob_to_skills() {
    let vp = Viewport::new(1440.0, 900.0);
    let mut choreo = Choreographer::new(vp, desktop_page());
    let mut stage = RecordingStage::new();

    scroll_to(&mut choreo, &mut stage, 0.0, 11600.0);
    scroll_to(&mut choreo, &mut stage, 11600.0, 8000.0);
    // Projects gave the blob back; Skills shows its final frame.
    assert_eq!(stage.opacity(ElementId::ProjectsBlob), Some(0.0));
    assert_eq!(stage.opacity(ElementId::SkillsBlob), Some(1.0));
    assert!(!choreo.projects().unwrap().is_floating());

    scroll_to(&mut choreo, &mut stage, 8000.0, 5000.0);
    assert!(!choreo.projects().unwrap().is_enabled());
    assert_eq!(stage.opacity(ElementId::SkillsBlob), Some(0.0));

    scroll_to(&mut choreo, &mut stage, 5000.0, 9100.0);
    assert!(choreo.projects().unwrap().is_enabled());
    assert_eq!(stage.opacity(ElementId::ProjectsBlob), Some(1.0));
    assert!(stage.all_finite());
}

#[test]
fn mobile_contact_swaps_to_its_own_blob() {
    let vp = Viewport::new(375.0, 812.0);
    let mut choreo = Choreographer::new(vp, mobile_page());
    let mut stage = RecordingStage::new();
    assert!(choreo.contact().is_none());

    scroll_to(&mut choreo, &mut stage, 0.0, 10000.0);
    assert!(choreo.contact().unwrap().has_mobile_blob());
    assert_eq!(stage.opacity(ElementId::ContactBlob), Some(1.0));
    assert_eq!(stage.opacity(ElementId::ProjectsBlob), Some(0.0));
    let blob = stage.get(ElementId::ContactBlob);
    assert_eq!(blob.rotation, Some(90.0));
    assert!(approx(blob.scale.unwrap(), choreo.geometry().scale(&vp) * 0.66));

    scroll_to(&mut choreo, &mut stage, 10000.0, 11200.0);
    assert_eq!(stage.opacity(ElementId::ContactBlob), Some(0.0));
}

#[test]
fn resize_rebuilds_without_non_finite_writes() {
    let mut choreo = Choreographer::new(Viewport::new(1440.0, 900.0), desktop_page());
    let mut stage = RecordingStage::new();
    scroll_to(&mut choreo, &mut stage, 0.0, 5000.0);

    let small = Viewport::new(800.0, 600.0);
    choreo.invalidate(
        small,
        Measurements {
            about_blob: None,
            ..desktop_page()
        },
    );
    assert!(!choreo.geometry().has_measurement());
    scroll_to(&mut choreo, &mut stage, 5000.0, 12500.0);
    scroll_to(&mut choreo, &mut stage, 12500.0, 0.0);

    assert!(stage.all_finite());
    assert!(choreo.mounted().all());
    let expected = choreo.geometry().scale(&small);
    assert_eq!(choreo.about().unwrap().centered_pose().scale, expected);
    assert_eq!(choreo.skills().unwrap().payload().scale, expected);
}

#[test]
fn degenerate_viewports_stay_finite() {
    for vp in [Viewport::new(320.0, 480.0), Viewport::new(3840.0, 2160.0)] {
        let mut choreo = Choreographer::new(vp, desktop_page());
        let mut stage = RecordingStage::new();
        scroll_to(&mut choreo, &mut stage, 0.0, 12500.0);
        assert!(stage.all_finite(), "{vp:?}");
    }
}

#[test]
fn missing_sections_are_retried_a_bounded_number_of_times() {
    let mut choreo = Choreographer::new(Viewport::new(1440.0, 900.0), Measurements::default());
    let mut stage = RecordingStage::new();
    // Rebuild pending: nothing to retry yet.
    assert!(!choreo.needs_remeasure());
    choreo.on_scroll(Frame::new(0.0, 0.0), &mut stage);
    assert!(choreo.needs_remeasure());

    for _ in 0..SECTION_RETRY_ATTEMPTS - 1 {
        assert!(choreo.note_retry().is_ok());
    }
    assert!(matches!(
        choreo.note_retry(),
        Err(ChoreoError::RetriesExhausted {
            section: "about",
            ..
        })
    ));
    assert!(!choreo.needs_remeasure());

    // The page finally rendered.
    choreo.invalidate(Viewport::new(1440.0, 900.0), desktop_page());
    choreo.on_scroll(Frame::new(0.0, 0.0), &mut stage);
    assert!(choreo.mounted().all());
    assert_eq!(choreo.retries_left(), SECTION_RETRY_ATTEMPTS);
}

#[test]
fn resize_is_debounced() {
    let mut choreo = Choreographer::new(Viewport::new(1440.0, 900.0), desktop_page());
    choreo.on_resize(0.0);
    choreo.on_resize(50.0);
    choreo.on_resize(100.0);
    assert!(!choreo.resize_due(200.0));
    assert!(choreo.resize_due(250.0));
    assert!(!choreo.resize_due(400.0));
}

#[test]
fn nav_targets_land_on_choreographed_offsets() {
    let choreo = Choreographer::new(Viewport::new(1440.0, 900.0), desktop_page());
    assert_eq!(choreo.scroll_target(NavSection::About), Some(0.0));
    assert_eq!(choreo.scroll_target(NavSection::Skills), Some(3550.0 + 700.0));
    assert_eq!(choreo.scroll_target(NavSection::Projects), Some(9400.0));
    assert_eq!(choreo.scroll_target(NavSection::Contact), Some(11000.0));
    assert_eq!(NavSection::from_anchor("#projects"), Some(NavSection::Projects));
    assert_eq!(NavSection::from_anchor("blog"), None);

    let empty = Choreographer::new(Viewport::new(1440.0, 900.0), Measurements::default());
    assert_eq!(empty.scroll_target(NavSection::Skills), None);
}

#[test]
fn bubble_sources_follow_orientation() {
    let mut choreo = Choreographer::new(Viewport::new(1440.0, 900.0), desktop_page());
    let mut stage = RecordingStage::new();
    choreo.on_scroll(Frame::new(0.0, 0.0), &mut stage);
    assert_eq!(
        stage.source(ElementId::BubbleImage(0)),
        Some("assets/skills/bubbles/1_1.webp")
    );
    // 3_1 carries a skill only on mobile.
    assert!(stage.source(ElementId::BubbleIcon(8)).is_none());
    assert!(stage
        .get(ElementId::BubbleContainer(0))
        .width
        .is_some_and(|w| w > 1.0));
}

#[test]
fn blob_targets_per_breakpoint() {
    let wide = Viewport::new(1440.0, 900.0);
    let mut g = BlobGeometry::new();
    g.set_initial_dimensions(&wide, 600.0, 400.0);
    let m = desktop_page();
    let base = g.scale(&wide);

    let projects = projects_target(&wide, &g, &m);
    assert_eq!(projects.center, wide.adjusted_center());
    assert!(approx(projects.scale, base * 0.78));

    let contact = contact_target(&wide, &g, &m);
    assert_eq!(contact.center.x, (700.0 + 1440.0) / 2.0);
    assert_eq!(contact.center.y, 450.0);
    assert!(approx(contact.scale, base * 0.68));

    let tablet = Viewport::new(900.0, 700.0);
    let g = BlobGeometry::new();
    assert!(approx(
        projects_target(&tablet, &g, &m).scale,
        g.scale(&tablet) * 0.74
    ));
    let narrow = contact_target(&tablet, &g, &m);
    assert_eq!(narrow.center.x, 450.0);
    assert!(approx(narrow.scale, g.scale(&tablet) * 0.62));
    assert!(narrow.center.y >= tablet.navbar_height() && narrow.center.y <= 700.0);

    let phone = Viewport::new(375.0, 812.0);
    let no_cards = Measurements {
        project_cards: None,
        ..mobile_page()
    };
    assert!(approx(
        projects_target(&phone, &g, &mobile_page()).scale,
        g.scale(&phone) * 0.66
    ));
    assert!(approx(
        projects_target(&phone, &g, &no_cards).scale,
        g.scale(&phone) * 0.78
    ));
}

#[test]
fn rise_sinks_and_fades_skillless_bubbles_on_mobile() {
    let vp = Viewport::new(375.0, 812.0);
    let mut choreo = Choreographer::new(vp, mobile_page());
    let mut stage = RecordingStage::new();
    let bubbles = choreo.bubbles().to_vec();
    let skills = skill_indices(&bubbles, true);

    // Halfway through rise: icons fade in one after another.
    scroll_to(&mut choreo, &mut stage, 0.0, 2844.0);
    for (k, &i) in skills.iter().enumerate() {
        let delay = k as f32 * 0.08;
        let expected = ((0.5 - delay) / (1.0 - delay)).clamp(0.0, 1.0);
        let icon = stage.opacity(ElementId::BubbleIcon(i)).unwrap();
        assert!(approx(icon, expected), "icon {k}: {icon} vs {expected}");
    }
    assert_eq!(stage.opacity(ElementId::BubbleIcon(skills[0])), Some(0.5));
    assert_eq!(stage.opacity(ElementId::SkillInfo), Some(0.0));

    // End of rise: skill-less bubbles are a viewport and a half lower and gone.
    scroll_to(&mut choreo, &mut stage, 2844.0, 3094.0);
    let mut dropped = 0;
    for (i, b) in bubbles.iter().enumerate() {
        if b.skill(true).is_some() {
            continue;
        }
        dropped += 1;
        let c = stage.get(ElementId::BubbleContainer(i));
        assert_eq!(c.opacity, Some(0.0));
        assert!(near(c.y.unwrap(), b.pos.y + 1.5 * 812.0));
        assert!(near(c.x.unwrap(), b.pos.x));
    }
    assert!(dropped > 0);
}

#[test]
fn scrolling_back_out_of_anchor_restores_the_rise_fade() {
    let vp = Viewport::new(375.0, 812.0);
    let mut choreo = Choreographer::new(vp, mobile_page());
    let mut stage = RecordingStage::new();
    let bubbles = choreo.bubbles().to_vec();
    let others: Vec<usize> = (0..bubbles.len())
        .filter(|&i| bubbles[i].skill(true).is_none())
        .collect();

    scroll_to(&mut choreo, &mut stage, 0.0, 3000.0);
    let forward: Vec<_> = others
        .iter()
        .map(|&i| stage.get(ElementId::BubbleContainer(i)))
        .collect();
    // Rise progress 0.812: still faintly visible on the way down.
    for c in &forward {
        assert!(near(c.opacity.unwrap(), 1.0 - 1.2 * 0.812));
    }

    // Anchor hides them at once.
    scroll_to(&mut choreo, &mut stage, 3000.0, 3200.0);
    for &i in &others {
        assert_eq!(stage.opacity(ElementId::BubbleContainer(i)), Some(0.0));
    }

    // Back into rise: the same interpolated state as on the way down.
    scroll_to(&mut choreo, &mut stage, 3200.0, 3000.0);
    for (&i, before) in others.iter().zip(&forward) {
        let c = stage.get(ElementId::BubbleContainer(i));
        assert!(near(c.opacity.unwrap(), before.opacity.unwrap()));
        assert!(near(c.y.unwrap(), before.y.unwrap()));
    }
}

#[test]
fn recollect_returns_bubbles_to_the_blob_arrangement() {
    let vp = Viewport::new(375.0, 812.0);
    let mut choreo = Choreographer::new(vp, mobile_page());
    let mut stage = RecordingStage::new();
    let bubbles = choreo.bubbles().to_vec();
    let skills = skill_indices(&bubbles, true);
    let layout = SkillsLayout::compute(&vp);
    let drop = 1.5 * 812.0;

    // Info is gone a quarter of the way in.
    scroll_to(&mut choreo, &mut stage, 0.0, 4294.0);
    assert_eq!(stage.opacity(ElementId::SkillInfo), Some(0.0));

    scroll_to(&mut choreo, &mut stage, 4294.0, 4494.0);
    for (k, &i) in skills.iter().enumerate() {
        let c = stage.get(ElementId::BubbleContainer(i));
        let slot = slot_position(k, bubbles[i].size, &vp, &layout);
        let mid = slot.lerp(bubbles[i].pos, 0.5);
        assert!(near(c.x.unwrap(), mid.x) && near(c.y.unwrap(), mid.y), "skill {k}");
        assert!(approx(stage.opacity(ElementId::BubbleIcon(i)).unwrap(), 0.5));
    }
    for (i, b) in bubbles.iter().enumerate() {
        if b.skill(true).is_none() {
            let c = stage.get(ElementId::BubbleContainer(i));
            assert!(approx(c.opacity.unwrap(), 0.5));
            assert!(near(c.y.unwrap(), b.pos.y + drop / 2.0));
        }
    }

    // Recollect done: every bubble back where the blob started.
    scroll_to(&mut choreo, &mut stage, 4494.0, 4894.0);
    for (i, b) in bubbles.iter().enumerate() {
        let c = stage.get(ElementId::BubbleContainer(i));
        assert!(near(c.x.unwrap(), b.pos.x) && near(c.y.unwrap(), b.pos.y), "bubble {i}");
    }
    assert!(stage.all_finite());
}

#[test]
fn loading_below_skills_shows_a_single_blob() {
    let vp = Viewport::new(1440.0, 900.0);
    let mut choreo = Choreographer::new(vp, desktop_page());
    let mut stage = RecordingStage::new();

    choreo.on_scroll(Frame::new(11600.0, 0.0), &mut stage);
    assert_eq!(stage.opacity(ElementId::SkillsBlob), Some(0.0));
    let blob = stage.get(ElementId::ProjectsBlob);
    assert_eq!(blob.opacity, Some(1.0));
    assert_eq!((blob.x, blob.y), (Some(770.0), Some(250.0)));
    assert!(choreo.projects().unwrap().is_enabled());

    choreo.on_scroll(Frame::new(11600.0, 16.0), &mut stage);
    assert_eq!(stage.opacity(ElementId::SkillsBlob), Some(0.0));
    assert_eq!(stage.opacity(ElementId::ProjectsBlob), Some(1.0));
}

#[test]
fn resizing_below_skills_keeps_a_single_blob() {
    let mut choreo = Choreographer::new(Viewport::new(1440.0, 900.0), desktop_page());
    let mut stage = RecordingStage::new();
    scroll_to(&mut choreo, &mut stage, 0.0, 11600.0);

    choreo.invalidate(Viewport::new(1400.0, 880.0), desktop_page());
    choreo.on_scroll(Frame::new(11600.0, 0.0), &mut stage);
    assert_eq!(stage.opacity(ElementId::SkillsBlob), Some(0.0));
    let blob = stage.get(ElementId::ProjectsBlob);
    assert_eq!(blob.opacity, Some(1.0));
    // Beside the card, centered vertically in the new viewport.
    assert_eq!((blob.x, blob.y), (Some(750.0), Some(240.0)));

    // Scrolling back over Skills still hands the blob back.
    scroll_to(&mut choreo, &mut stage, 11600.0, 8000.0);
    assert_eq!(stage.opacity(ElementId::ProjectsBlob), Some(0.0));
    assert_eq!(stage.opacity(ElementId::SkillsBlob), Some(1.0));
}

#[test]
fn idle_float_starts_without_a_jump() {
    let vp = Viewport::new(1440.0, 900.0);
    let mut choreo = Choreographer::new(vp, desktop_page());
    let mut stage = RecordingStage::new();
    scroll_to(&mut choreo, &mut stage, 0.0, 10100.0);

    let mut last = stage.get(ElementId::ProjectsBlob);
    let mut s = 10100.0;
    while s < 11550.0 {
        s += 1.0;
        choreo.on_scroll(Frame::new(s, 0.0), &mut stage);
        let blob = stage.get(ElementId::ProjectsBlob);
        let dx = blob.x.unwrap() - last.x.unwrap();
        let dy = blob.y.unwrap() - last.y.unwrap();
        assert!((dx * dx + dy * dy).sqrt() < 2.0, "jump at {s}: {last:?} -> {blob:?}");
        last = blob;
    }
    assert!(choreo.projects().unwrap().is_floating());
    assert!(approx(last.x.unwrap(), 770.0) && approx(last.y.unwrap(), 250.0));
}

#[test]
fn remeasuring_at_the_same_scroll_keeps_the_about_anchor() {
    let vp = Viewport::new(375.0, 812.0);
    let mut choreo = Choreographer::new(vp, mobile_page());
    let mut stage = RecordingStage::new();
    scroll_to(&mut choreo, &mut stage, 0.0, 1500.0);
    let first = choreo.about().unwrap().range_of(AboutPhase::Centering);

    for _ in 0..2 {
        choreo.invalidate(
            vp,
            Measurements {
                scroll_y: 1500.0,
                ..mobile_page()
            },
        );
        choreo.on_scroll(Frame::new(1500.0, 0.0), &mut stage);
        assert_eq!(choreo.about().unwrap().range_of(AboutPhase::Centering), first);
    }
}

#[test]
fn narrow_contact_target_ignores_measure_time_scroll() {
    let phone = Viewport::new(375.0, 812.0);
    let g = BlobGeometry::new();
    let page = Measurements {
        contact_card: Some(Rect::new(16.0, 11000.0, 343.0, 400.0)),
        ..mobile_page()
    };
    let at_top = contact_target(&phone, &g, &page);
    let scrolled = contact_target(
        &phone,
        &g,
        &Measurements {
            scroll_y: 9000.0,
            ..page
        },
    );
    assert_eq!(at_top, scrolled);
    // Card center on screen when the contact bottom reaches the center line.
    assert_eq!(at_top.center, glam::Vec2::new(187.5, 11200.0 - (11500.0 - 406.0)));
}
