// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted walkthroughs of the dropdown engine.
//!
//! Run with `RUST_LOG=trace` to see absorbed input as well as transitions.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect};
use tracing_subscriber::EnvFilter;
use understory_dropdown::{
    Dropdown, DropdownHost, FocusTarget, ItemId, ItemSpec, Key, KeyEvent, PointerEvent,
};

/// Host that logs focus moves and queues synthesized clicks.
#[derive(Debug, Default)]
struct ConsoleHost {
    focused: Option<FocusTarget>,
    clicks: Vec<ItemId>,
}

impl DropdownHost for ConsoleHost {
    fn focus(&mut self, target: FocusTarget) {
        tracing::info!(?target, "focus");
        self.focused = Some(target);
    }

    fn focused(&self) -> Option<FocusTarget> {
        self.focused
    }

    fn click_item(&mut self, item: ItemId) {
        tracing::info!(?item, "synthesized click");
        self.clicks.push(item);
    }

    fn set_tooltips_suppressed(&mut self, suppressed: bool) {
        tracing::info!(suppressed, "tooltips");
    }
}

type Selected = Rc<RefCell<String>>;

fn build(host: &mut ConsoleHost, entries: &[(&'static str, ItemSpec)]) -> (Dropdown, Vec<ItemId>, Selected) {
    let mut menu = Dropdown::new("actions");
    menu.sync_trigger_id("actions-button");
    menu.set_popover_bounds(Some(Rect::new(0.0, 30.0, 200.0, 30.0 + 24.0 * entries.len() as f64)));
    let selected = Selected::default();
    let mut ids = Vec::new();
    for (name, spec) in entries {
        let id = menu.register_item(host, spec.clone());
        if let Err(err) = menu.set_item_text(host, id, name) {
            tracing::warn!(%err, "could not set item text");
        }
        let selected = Rc::clone(&selected);
        let name = *name;
        if let Err(err) = menu.set_on_select(id, move || *selected.borrow_mut() = name.to_owned()) {
            tracing::warn!(%err, "could not record callback");
        }
        ids.push(id);
    }
    (menu, ids, selected)
}

fn basic() {
    tracing::info!("--- basic: click, arrows, enter");
    let mut host = ConsoleHost::default();
    let (mut menu, _, selected) = build(
        &mut host,
        &[
            ("Download", ItemSpec::new()),
            ("Create a Copy", ItemSpec::new()),
            ("Delete", ItemSpec::new()),
        ],
    );
    let press = PointerEvent::new(Point::new(20.0, 10.0), 0);
    let _ = menu.on_trigger_pointer_down(&mut host, &press);
    let _ = menu.on_document_pointer_down(&mut host, &press);
    for (time, key) in [(100, Key::ArrowDown), (200, Key::ArrowDown), (300, Key::Enter)] {
        let _ = menu.on_items_key_down(&mut host, &KeyEvent::new(key, time));
    }
    tracing::info!(selected = %selected.borrow(), expanded = menu.is_expanded(), "done");
}

fn disabled_items() {
    tracing::info!("--- disabled items: keyboard open, typeahead, quick release");
    let mut host = ConsoleHost::default();
    let (mut menu, ids, selected) = build(
        &mut host,
        &[
            ("Download", ItemSpec::new()),
            ("Create a Copy", ItemSpec::new()),
            ("Oops. I'm disabled!", ItemSpec::new().disabled(true)),
            ("Delete", ItemSpec::new()),
            ("Reset", ItemSpec::new()),
        ],
    );
    let _ = menu.on_trigger_key_down(&mut host, &KeyEvent::new(Key::ArrowDown, 0));
    for (time, c) in [(50, 'd'), (120, 'e')] {
        let _ = menu.on_items_key_down(&mut host, &KeyEvent::new(Key::Character(c), time));
    }
    tracing::info!(query = menu.typeahead_query(), active = ?menu.selection_index(), "typeahead");
    menu.tick(&mut host, 1120);
    tracing::info!(query = menu.typeahead_query(), "after quiet period");

    let _ = menu.on_items_key_down(&mut host, &KeyEvent::new(Key::Escape, 1200));
    let press = PointerEvent::new(Point::new(20.0, 40.0), 2000);
    let _ = menu.on_trigger_pointer_down(&mut host, &press);
    let _ = menu.on_document_pointer_down(&mut host, &press);
    let release = PointerEvent::new(Point::new(21.0, 41.0), 2050);
    let _ = menu.on_item_pointer_up(&mut host, ids[0], &release);
    menu.on_document_pointer_up();
    tracing::info!(selected = %selected.borrow(), expanded = menu.is_expanded(), "quick release absorbed");
}

fn links() {
    tracing::info!("--- links: activation goes through a native click");
    let mut host = ConsoleHost::default();
    let (mut menu, _, selected) = build(
        &mut host,
        &[
            ("Reset", ItemSpec::new()),
            ("Go back", ItemSpec::new().link(true)),
            ("Me too!", ItemSpec::new().link(true).disabled(true)),
        ],
    );
    let _ = menu.on_trigger_key_down(&mut host, &KeyEvent::new(Key::Enter, 0));
    let _ = menu.on_items_key_down(&mut host, &KeyEvent::new(Key::End, 10));
    let _ = menu.on_items_key_down(&mut host, &KeyEvent::new(Key::Enter, 20));
    for item in std::mem::take(&mut host.clicks) {
        let _ = menu.on_item_click(&mut host, item, &PointerEvent::new(Point::ZERO, 21));
    }
    tracing::info!(selected = %selected.borrow(), expanded = menu.is_expanded(), "done");
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    basic();
    disabled_items();
    links();
}
