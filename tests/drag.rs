//! Direct drag tests through the update loop
//!
//! The demo sheet's header spans the first 160px of the panel, so at the
//! anchor (top 400) touches between y=400 and y=560 grab the header.

mod common;

use std::time::Instant;

use common::{after, run_settle, sheet_config, test_model};
use tabsheet::commands::Cmd;
use tabsheet::config::BehaviorConfig;
use tabsheet::messages::{Msg, TouchMsg};
use tabsheet::panel::{PanelState, PointerId, TouchAction};
use tabsheet::update::update;
use tabsheet::AppModel;

fn touch(model: &mut AppModel, action: TouchAction, y: i32, at: Instant) -> Option<Cmd> {
    update(model, Msg::touch(action, 10, y, at))
}

#[test]
fn test_header_drag_follows_pointer() {
    let (mut model, log) = test_model(sheet_config());
    let t0 = Instant::now();
    touch(&mut model, TouchAction::Down, 450, t0);
    assert!(model.behavior().unwrap().gesture().capture.is_some());

    assert_eq!(touch(&mut model, TouchAction::Move, 445, after(t0, 10)), None);
    assert_eq!(model.panel_top(), Some(400));

    assert_eq!(
        touch(&mut model, TouchAction::Move, 380, after(t0, 20)),
        Some(Cmd::Redraw)
    );
    assert_eq!(model.panel_top(), Some(330));
    assert_eq!(model.state(), Some(PanelState::Dragging));
    assert_eq!(log.states(), vec![PanelState::Dragging]);

    // Dragging above expanded clamps at min offset
    touch(&mut model, TouchAction::Move, -500, after(t0, 30));
    assert_eq!(model.panel_top(), Some(0));

    assert_eq!(touch(&mut model, TouchAction::Up, -500, after(t0, 40)), None);
    assert_eq!(model.panel_top(), Some(0));
    assert!(!model.behavior().unwrap().gesture().is_dragging());
}

#[test]
fn test_touch_on_list_leaves_panel_to_nested_scroll() {
    let (mut model, _) = test_model(sheet_config());
    let t0 = Instant::now();
    touch(&mut model, TouchAction::Down, 700, t0);
    let gesture = model.behavior().unwrap().gesture();
    assert!(gesture.touching_scrolling_child);
    assert!(gesture.capture.is_none());

    touch(&mut model, TouchAction::Move, 600, after(t0, 10));
    assert_eq!(model.panel_top(), Some(400));
}

#[test]
fn test_touch_above_panel_ignored() {
    let (mut model, log) = test_model(sheet_config());
    let t0 = Instant::now();
    touch(&mut model, TouchAction::Down, 100, t0);
    assert!(model.behavior().unwrap().gesture().ignore_events);
    touch(&mut model, TouchAction::Move, 300, after(t0, 10));
    touch(&mut model, TouchAction::Up, 300, after(t0, 20));
    assert_eq!(model.panel_top(), Some(400));
    assert!(log.is_empty());
}

#[test]
fn test_other_pointer_does_not_move_capture() {
    let (mut model, _) = test_model(sheet_config());
    let t0 = Instant::now();
    touch(&mut model, TouchAction::Down, 450, t0);
    update(
        &mut model,
        Msg::Touch(TouchMsg::Move {
            pointer: PointerId(7),
            x: 10,
            y: 300,
            at: after(t0, 10),
        }),
    );
    assert_eq!(model.panel_top(), Some(400));
}

#[test]
fn test_cancel_ends_gesture_in_place() {
    let (mut model, _) = test_model(sheet_config());
    let t0 = Instant::now();
    touch(&mut model, TouchAction::Down, 450, t0);
    touch(&mut model, TouchAction::Move, 500, after(t0, 10));
    assert_eq!(model.panel_top(), Some(450));
    touch(&mut model, TouchAction::Cancel, 0, after(t0, 20));
    assert_eq!(model.panel_top(), Some(450));
    assert!(model.behavior().unwrap().gesture().capture.is_none());
}

#[test]
fn test_upward_fling_settles_expanded() {
    let (mut model, log) = test_model(BehaviorConfig {
        settle_on_release: true,
        ..sheet_config()
    });
    let t0 = Instant::now();
    touch(&mut model, TouchAction::Down, 450, t0);
    touch(&mut model, TouchAction::Move, 430, after(t0, 10));
    touch(&mut model, TouchAction::Move, 400, after(t0, 20));
    let cmd = touch(&mut model, TouchAction::Up, 370, after(t0, 30));
    assert!(cmd.as_ref().and_then(Cmd::settle_token).is_some());

    let ticks = run_settle(&mut model, cmd);
    assert!(ticks > 1);
    assert_eq!(model.panel_top(), Some(0));
    assert_eq!(model.state(), Some(PanelState::Expanded));
    assert_eq!(log.states().last(), Some(&PanelState::Expanded));
    assert_eq!(log.slides().last(), Some(&1.0));
}

#[test]
fn test_downward_fling_hides_when_hideable() {
    let (mut model, _) = test_model(BehaviorConfig {
        settle_on_release: true,
        hideable: true,
        ..sheet_config()
    });
    let t0 = Instant::now();
    touch(&mut model, TouchAction::Down, 450, t0);
    // Drag to 850: inside the peek band below the collapsed line
    touch(&mut model, TouchAction::Move, 700, after(t0, 10));
    touch(&mut model, TouchAction::Move, 900, after(t0, 20));
    assert_eq!(model.panel_top(), Some(850));
    let cmd = touch(&mut model, TouchAction::Up, 950, after(t0, 30));
    run_settle(&mut model, cmd);
    assert_eq!(model.state(), Some(PanelState::Hidden));
    assert_eq!(model.panel_top(), Some(1000));
}

#[test]
fn test_slow_release_stays_put_by_default() {
    let (mut model, log) = test_model(sheet_config());
    let t0 = Instant::now();
    touch(&mut model, TouchAction::Down, 450, t0);
    touch(&mut model, TouchAction::Move, 600, after(t0, 100));
    let cmd = touch(&mut model, TouchAction::Up, 600, after(t0, 200));
    assert_eq!(cmd, None);
    assert_eq!(model.panel_top(), Some(550));
    assert_eq!(model.state(), Some(PanelState::Dragging));
    assert_eq!(log.states(), vec![PanelState::Dragging]);
}
