// ABOUTME: Headless demonstration of the flow grid and zoom transitions.
// ABOUTME: Drives the layout with fixed 16ms ticks and logs panel geometry at each phase.

use std::time::Duration;

use anyhow::Result;
use zg_layout::{CellAssignment, FlowGridLayout, LayoutConfig, Rect, SizePolicy};

fn dump(layout: &FlowGridLayout, label: &str) {
    tracing::info!("--- {label} ---");
    for id in layout.panels() {
        if let Some(panel) = layout.panel(id) {
            tracing::info!(
                ?id,
                visible = panel.visible,
                "cell ({},{}) span {}x{} rect ({:.0},{:.0} {:.0}x{:.0})",
                panel.cell.row,
                panel.cell.col,
                panel.cell.row_span,
                panel.cell.col_span,
                panel.current_geometry.x,
                panel.current_geometry.y,
                panel.current_geometry.width,
                panel.current_geometry.height,
            );
        }
    }
}

fn settle(layout: &mut FlowGridLayout) {
    while layout.is_animating() {
        layout.tick(Duration::from_millis(16));
    }
    // One extra tick flushes a just-finished batch
    layout.tick(Duration::from_millis(16));
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = LayoutConfig::load_or_default();
    let mut layout = FlowGridLayout::with_config(Rect::new(0.0, 0.0, 450.0, 300.0), &config);

    let banner = layout
        .add_widget(SizePolicy::default(), CellAssignment::new(0, 0, 1, 2))
        .expect("banner cell is free");
    layout.add_widget_list(vec![SizePolicy::default(); 4]);
    dump(&layout, "initial placement");

    layout.zoom_to(banner);
    settle(&mut layout);
    dump(&layout, "zoomed");

    layout.set_container(Rect::new(0.0, 0.0, 600.0, 400.0));
    dump(&layout, "resized while zoomed");

    layout.show_all();
    settle(&mut layout);
    dump(&layout, "restored");

    Ok(())
}
