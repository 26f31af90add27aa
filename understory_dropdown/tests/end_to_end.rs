// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Full interaction flows across trigger, popover, items container, and items.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect};
use understory_dropdown::{
    Dropdown, DropdownHost, FocusEvent, FocusTarget, ItemId, ItemSpec, Key, KeyEvent,
    PointerEvent,
};

#[derive(Debug, Default)]
struct Host {
    focused: Option<FocusTarget>,
    pending_clicks: Vec<ItemId>,
}

impl DropdownHost for Host {
    fn focus(&mut self, target: FocusTarget) {
        self.focused = Some(target);
    }

    fn focused(&self) -> Option<FocusTarget> {
        self.focused
    }

    fn click_item(&mut self, item: ItemId) {
        self.pending_clicks.push(item);
    }
}

impl Host {
    /// Deliver synthesized clicks the way a document would.
    fn flush_clicks(&mut self, dropdown: &mut Dropdown, time: u64) {
        for item in std::mem::take(&mut self.pending_clicks) {
            let _ = dropdown.on_item_click(self, item, &PointerEvent::new(Point::ZERO, time));
        }
    }
}

/// The "with disabled items" menu, recording committed actions.
fn actions_menu(host: &mut Host) -> (Dropdown, Vec<ItemId>, Rc<RefCell<Vec<&'static str>>>) {
    let mut dropdown = Dropdown::new("actions");
    dropdown.sync_trigger_id("actions-button");
    let log = Rc::new(RefCell::new(Vec::new()));
    let entries: [(&'static str, ItemSpec); 7] = [
        ("Download", ItemSpec::new()),
        ("Copy", ItemSpec::new()),
        ("Mark as Draft", ItemSpec::new().disabled(true)),
        ("Delete", ItemSpec::new()),
        ("Reset", ItemSpec::new()),
        ("Go back", ItemSpec::new().link(true)),
        ("Me too", ItemSpec::new().link(true).disabled(true)),
    ];
    let mut ids = Vec::new();
    for (name, spec) in entries {
        let id = dropdown.register_item(host, spec);
        dropdown.set_item_text(host, id, name).unwrap();
        let log = Rc::clone(&log);
        dropdown
            .set_on_select(id, move || log.borrow_mut().push(name))
            .unwrap();
        ids.push(id);
    }
    dropdown.set_popover_bounds(Some(Rect::new(0.0, 30.0, 200.0, 240.0)));
    (dropdown, ids, log)
}

#[test]
fn click_open_navigate_and_commit() {
    let mut host = Host::default();
    let (mut dropdown, _, log) = actions_menu(&mut host);

    let press = PointerEvent::new(Point::new(20.0, 10.0), 0);
    let _ = dropdown.on_trigger_pointer_down(&mut host, &press);
    let _ = dropdown.on_document_pointer_down(&mut host, &press);
    assert!(dropdown.is_expanded());
    assert_eq!(dropdown.selection_index(), None);
    assert_eq!(host.focused, Some(FocusTarget::Menu));

    let _ = dropdown.on_items_key_down(&mut host, &KeyEvent::new(Key::ArrowDown, 100));
    assert_eq!(dropdown.selection_index(), Some(0));
    let _ = dropdown.on_items_key_down(&mut host, &KeyEvent::new(Key::ArrowDown, 200));
    assert_eq!(dropdown.selection_index(), Some(1));
    assert_eq!(
        dropdown.items_props().active_descendant.as_deref(),
        Some("option-1--actions")
    );

    let _ = dropdown.on_items_key_down(&mut host, &KeyEvent::new(Key::Enter, 300));
    assert_eq!(*log.borrow(), ["Copy"]);
    assert!(!dropdown.is_expanded());
    assert_eq!(dropdown.selection_index(), None);
    assert_eq!(host.focused, Some(FocusTarget::Trigger));
    assert!(dropdown.popover_props().hidden);
}

#[test]
fn arrows_and_typeahead_skip_disabled_items() {
    let mut host = Host::default();
    let (mut dropdown, _, _) = actions_menu(&mut host);
    let _ = dropdown.on_trigger_key_down(&mut host, &KeyEvent::new(Key::ArrowDown, 0));
    assert_eq!(dropdown.selection_index(), Some(0));

    for (time, expected) in [(10, 1), (20, 3), (30, 4), (40, 5), (50, 5)] {
        let _ = dropdown.on_items_key_down(&mut host, &KeyEvent::new(Key::ArrowDown, time));
        assert_eq!(dropdown.selection_index(), Some(expected));
    }

    let _ = dropdown.on_items_key_down(&mut host, &KeyEvent::new(Key::Character('m'), 60));
    assert_eq!(dropdown.selection_index(), Some(5), "disabled items never match");

    dropdown.tick(&mut host, 1060);
    assert_eq!(dropdown.typeahead_query(), "");
    let _ = dropdown.on_items_key_down(&mut host, &KeyEvent::new(Key::Character('d'), 1100));
    assert_eq!(dropdown.selection_index(), Some(0));
    let _ = dropdown.on_items_key_down(&mut host, &KeyEvent::new(Key::Character('e'), 1200));
    assert_eq!(dropdown.selection_index(), Some(3));
}

#[test]
fn press_drag_release_selects_item_under_pointer() {
    let mut host = Host::default();
    let (mut dropdown, ids, log) = actions_menu(&mut host);

    let press = PointerEvent::new(Point::new(20.0, 10.0), 0);
    let _ = dropdown.on_trigger_pointer_down(&mut host, &press);
    let _ = dropdown.on_document_pointer_down(&mut host, &press);

    // Drag down over "Delete" and release.
    let over_delete = PointerEvent::new(Point::new(20.0, 130.0), 150);
    let _ = dropdown.on_item_pointer_enter(&mut host, ids[3], &over_delete);
    let _ = dropdown.on_item_pointer_move(&mut host, ids[3], &over_delete);
    let _ = dropdown.on_item_pointer_up(&mut host, ids[3], &over_delete);
    dropdown.on_document_pointer_up();

    assert_eq!(*log.borrow(), ["Delete"]);
    assert!(!dropdown.is_expanded());
}

#[test]
fn quick_release_over_item_does_not_select() {
    let mut host = Host::default();
    let (mut dropdown, ids, log) = actions_menu(&mut host);

    let press = PointerEvent::new(Point::new(20.0, 35.0), 0);
    let _ = dropdown.on_trigger_pointer_down(&mut host, &press);
    let _ = dropdown.on_document_pointer_down(&mut host, &press);

    // The popover opened under the pointer; the release lands on "Download".
    let release = PointerEvent::new(Point::new(21.0, 36.0), 80);
    let _ = dropdown.on_item_pointer_move(&mut host, ids[0], &release);
    let _ = dropdown.on_item_pointer_up(&mut host, ids[0], &release);
    dropdown.on_document_pointer_up();

    assert!(log.borrow().is_empty());
    assert!(dropdown.is_expanded());
    assert_eq!(dropdown.selection_index(), Some(0));
}

#[test]
fn link_items_commit_through_click() {
    let mut host = Host::default();
    let (mut dropdown, ids, log) = actions_menu(&mut host);
    let _ = dropdown.on_trigger_key_down(&mut host, &KeyEvent::new(Key::Enter, 0));
    let _ = dropdown.on_items_key_down(&mut host, &KeyEvent::new(Key::End, 10));
    assert_eq!(dropdown.selection_index(), Some(5));

    let _ = dropdown.on_items_key_down(&mut host, &KeyEvent::new(Key::Enter, 20));
    assert_eq!(host.pending_clicks, [ids[5]]);
    host.flush_clicks(&mut dropdown, 21);

    assert_eq!(*log.borrow(), ["Go back"]);
    assert!(!dropdown.is_expanded());
}

#[test]
fn outside_press_and_blur_dismiss() {
    let mut host = Host::default();
    let (mut dropdown, _, _) = actions_menu(&mut host);
    let _ = dropdown.on_trigger_key_down(&mut host, &KeyEvent::new(Key::Space, 0));
    let _ = dropdown.on_document_pointer_down(
        &mut host,
        &PointerEvent::new(Point::new(150.0, 100.0), 10),
    );
    assert!(dropdown.is_expanded(), "press inside the popover");
    let _ = dropdown.on_document_pointer_down(
        &mut host,
        &PointerEvent::new(Point::new(500.0, 100.0), 20),
    );
    assert!(!dropdown.is_expanded());

    let _ = dropdown.on_trigger_key_down(&mut host, &KeyEvent::new(Key::Space, 30));
    let _ = dropdown.on_popover_focus_out(
        &mut host,
        &FocusEvent::new(Some(FocusTarget::Outside), 40),
    );
    assert!(!dropdown.is_expanded());
}

#[test]
fn selection_survives_items_added_while_open() {
    let mut host = Host::default();
    let (mut dropdown, _, log) = actions_menu(&mut host);
    let _ = dropdown.on_trigger_key_down(&mut host, &KeyEvent::new(Key::ArrowDown, 0));
    let _ = dropdown.on_items_key_down(&mut host, &KeyEvent::new(Key::ArrowDown, 10));
    assert_eq!(dropdown.selection_index(), Some(1));

    let id = dropdown
        .insert_item(&mut host, 0, ItemSpec::new().value_text("Upload"))
        .unwrap();
    assert_eq!(dropdown.selection_index(), Some(2));
    assert!(!dropdown.is_item_selected(id));

    let _ = dropdown.on_items_key_down(&mut host, &KeyEvent::new(Key::Enter, 20));
    assert_eq!(*log.borrow(), ["Copy"]);
}

#[test]
fn reopening_requires_a_fresh_ready_delay() {
    let mut host = Host::default();
    let (mut dropdown, ids, log) = actions_menu(&mut host);
    let press = PointerEvent::new(Point::new(20.0, 10.0), 0);
    let _ = dropdown.on_trigger_pointer_down(&mut host, &press);
    dropdown.tick(&mut host, 400);
    assert!(dropdown.is_ready_to_select());

    let _ = dropdown.on_items_key_down(&mut host, &KeyEvent::new(Key::Escape, 500));
    assert!(!dropdown.is_ready_to_select());

    let press = PointerEvent::new(Point::new(20.0, 35.0), 1000);
    let _ = dropdown.on_trigger_pointer_down(&mut host, &press);
    assert_eq!(dropdown.next_deadline(), Some(1400));
    let _ = dropdown.on_item_pointer_up(&mut host, ids[0], &PointerEvent::new(Point::new(20.0, 35.0), 1100));
    assert!(log.borrow().is_empty());
}
