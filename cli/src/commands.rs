use std::io::Write;

use statusbar_core::{DisplayEntry, HostEvent, OVERLAY_NAMESPACE, StatusbarConfigExt};
use statusbar_overlay::ParentWindow;

use crate::CliContext;

pub fn toggle(ctx: &mut CliContext) {
    let enabled = ctx.bar.toggle();
    println!("statusbar {}", if enabled { "enabled" } else { "disabled" });
}

pub fn set_note(ctx: &mut CliContext, text: &str) {
    ctx.bar.set_note(text);
    show_overlay(ctx);
}

pub fn clear_note(ctx: &mut CliContext) {
    ctx.bar.clear_note();
    show_overlay(ctx);
}

pub fn set_variable(ctx: &mut CliContext, name: &str, value: &str) {
    ctx.set_variable(name, value);
    show_overlay(ctx);
}

pub fn clear_variable(ctx: &mut CliContext, name: &str) {
    ctx.bar.variables_mut().clear(name);
    ctx.bar.process_pending();
    show_overlay(ctx);
}

pub fn unbind_variable(ctx: &mut CliContext, name: &str) {
    if !ctx.bar.variables_mut().unbind(name) {
        println!("{name} is not bound");
    }
    ctx.bar.process_pending();
    show_overlay(ctx);
}

pub fn push_entry(ctx: &mut CliContext, entry: DisplayEntry) {
    ctx.bar.display_list().push(entry);
    ctx.bar.process_pending();
    show_strip(ctx);
}

pub fn focus(ctx: &mut CliContext, focused: bool) {
    ctx.bar.handle_host_event(HostEvent::FocusChanged { focused });
    show_overlay(ctx);
}

pub fn switch_workspace(ctx: &mut CliContext) {
    ctx.bar.handle_host_event(HostEvent::WorkspaceSwitched);
    show_overlay(ctx);
}

pub fn set_tray(ctx: &mut CliContext, icons: u32) {
    ctx.tray.set_icons(icons);
    ctx.bar.refresh();
    show_overlay(ctx);
}

pub fn resize(ctx: &mut CliContext, width: u32, height: u32) {
    ctx.bar
        .surface_mut()
        .set_parent(ParentWindow { width, height });
    ctx.bar.refresh();
    show_overlay(ctx);
}

pub fn show_status(ctx: &CliContext) {
    let snapshot = ctx.bar.snapshot();
    println!("{:<12} {}", "enabled", snapshot.enabled);
    println!("{:<12} {}", "note", snapshot.note.as_deref().unwrap_or("-"));
    println!(
        "{:<12} {}",
        "hook",
        snapshot
            .hook
            .map_or_else(|| "-".to_string(), |h| format!("{h:?}"))
    );
    println!("{:<12} {}", "watching", snapshot.subscribed.join(", "));
    println!("{:<12} {}", "tray icons", ctx.tray.icon_count());
    show_strip(ctx);
    show_overlay(ctx);
}

pub fn show_strip(ctx: &CliContext) {
    let entries: Vec<String> = ctx
        .bar
        .display_list()
        .entries()
        .iter()
        .map(ToString::to_string)
        .collect();
    println!("{:<12} [{}]", "strip", entries.join(" "));
}

pub fn show_overlay(ctx: &CliContext) {
    match ctx.bar.surface().frame(OVERLAY_NAMESPACE) {
        Some(frame) => {
            let parent = ctx.bar.surface().parent();
            println!(
                "{:<12} {:?} at ({}, {}) {}x{} in {}x{}",
                "overlay",
                frame.text,
                frame.rect.x,
                frame.rect.y,
                frame.rect.width,
                frame.rect.height,
                parent.width,
                parent.height
            );
        }
        None => println!("{:<12} hidden", "overlay"),
    }
}

pub fn save_config(ctx: &CliContext) -> Result<(), String> {
    ctx.bar.config().save().map_err(|e| e.to_string())?;
    println!("configuration saved");
    Ok(())
}

pub fn exit(ctx: &mut CliContext) -> Result<(), String> {
    ctx.bar.disable();
    write!(std::io::stdout(), "quitting...").map_err(|e| e.to_string())?;
    std::io::stdout().flush().map_err(|e| e.to_string())
}
