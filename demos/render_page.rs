//! Render Page Example - mount the showcase page and print it
//!
//! This example walks the page through a browser-like lifecycle:
//! - Mount the layout (ad slot waits for the load signal)
//! - Install the ad queue and fire the load signal
//! - Print the resulting markup
//! - Scroll the live demo into view, copy a snippet, preview it in the terminal
//!
//! Configure the ad placement with SHOWCASE_AD_CLIENT, SHOWCASE_AD_SLOT,
//! SHOWCASE_AD_FORMAT and SHOWCASE_AD_LAYOUT.
//!
//! Run with: RUST_LOG=debug cargo run --example render_page

use std::io;
use std::time::Instant;

use log::{error, info};
use spark_showcase::{
    demo::{clipboard, render_ansi},
    dom, host, mount_page, ShowcaseConfig,
};

fn main() -> io::Result<()> {
    env_logger::init();

    let config = ShowcaseConfig::from_env();
    info!("placement {} / {} ({})", config.publisher_id, config.slot_id, config.format);

    let page = mount_page(&config, || {
        let hero = dom::create_element("section");
        let _ = dom::set_attribute(hero, "id", "hero");
        dom::with_parent(hero, || {
            let title = dom::create_element("h1");
            let _ = dom::set_text(title, "Your AI pair programmer");
        });
    });

    // Document parsed, ad network script arrives, then the load event
    host::mark_interactive();
    host::install_ad_queue();
    let woken = host::dispatch_load();
    info!("load signal woke {woken} listener(s), {} request(s) queued", host::ad_queue_len());

    match page.markup() {
        Ok(html) => println!("{html}\n"),
        Err(err) => error!("markup failed [{}]: {err}", err.as_label()),
    }

    let viewer = page.viewer();
    viewer.observe_visibility(0.25);
    viewer.select(1);

    let now = Instant::now();
    if viewer.copy_selected(now) {
        if let Some(code) = clipboard::paste() {
            clipboard::write_osc52(&mut io::stdout(), &code)?;
        }
    }

    if let Some(snippet) = viewer.selected_snippet() {
        println!("=== {} [{}] ===", snippet.title, viewer.copy_label());
    }
    render_ansi(&mut io::stdout(), &viewer.highlighted())?;

    page.unmount();
    Ok(())
}
