// ABOUTME: Demo entry point for the panel dock.
// ABOUTME: Builds a file-browser layout, replays a resize drag, and persists geometry.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use dock_core::{DockConfig, FileStore};
use dock_layout::{
    Container, LayoutFrame, NestedContainer, PanelEvent, PanelKey, PanelOptions, Point,
    PointerEvent, PointerId, Rect, Region,
};
use tokio::sync::broadcast;
use tracing_subscriber::EnvFilter;

/// Stand-ins for the widgets a real shell would dock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Toolbar,
    FolderTree,
    FileList,
    Details,
    StatusBar,
}

const WINDOW: Rect = Rect::new(0.0, 0.0, 1280.0, 800.0);
const MOUSE: PointerId = PointerId(1);

fn print_frame(label: &str, frame: &LayoutFrame) {
    println!("{label}");
    for (region, rect) in frame.regions() {
        println!(
            "  {:<7} x={:>6.1} y={:>6.1} w={:>6.1} h={:>6.1}",
            region.as_str(),
            rect.x,
            rect.y,
            rect.width,
            rect.height
        );
    }
}

fn drain_events(events: &mut broadcast::Receiver<PanelEvent>) {
    while let Ok(event) = events.try_recv() {
        match event {
            PanelEvent::Close { panel, id, .. } => {
                tracing::info!("Closed panel {:?} ({:?})", panel, id)
            }
            PanelEvent::Toggle { panel, collapsed, .. } => {
                tracing::info!("Panel {:?} collapsed={}", panel, collapsed)
            }
            PanelEvent::Resized { region, size, .. } => {
                tracing::trace!("Region {} resized to {}", region, size)
            }
        }
    }
}

/// Dock the three-pane explorer inside the shell's center region
fn populate_explorer(shell: &mut Container<View>, explorer: PanelKey) -> Result<PanelKey> {
    let inner = shell
        .panel_mut(explorer)
        .and_then(|panel| panel.as_nested_mut())
        .and_then(NestedContainer::container_mut)
        .ok_or_else(|| anyhow!("Explorer panel has no inner container"))?;

    // Collaborators may hand us region names as strings
    inner.add_panel(
        View::FolderTree,
        "left",
        PanelOptions::new().id("tree").title("Folders").collapsible(true),
    );
    inner.add_panel(View::FileList, "center", PanelOptions::new().id("list"));
    inner
        .add_panel(
            View::Details,
            "right",
            PanelOptions::new()
                .id("details")
                .title("Details")
                .closable(true)
                .collapsible(true),
        )
        .ok_or_else(|| anyhow!("Failed to dock details panel"))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting panel-dock demo");

    let config = DockConfig::load_or_default();
    let dir = config
        .state_dir
        .clone()
        .or_else(FileStore::default_dir)
        .ok_or_else(|| anyhow!("Could not determine state directory"))?;
    tracing::info!("Persisting layouts in {}", dir.display());

    let mut shell: Container<View> = Container::new(config, Arc::new(FileStore::new(dir)));
    let mut events = shell.subscribe();

    shell.add_panel(View::Toolbar, Region::Top, PanelOptions::new().id("toolbar"));
    shell.add_panel(
        View::StatusBar,
        Region::Bottom,
        PanelOptions::new().id("status"),
    );

    let explorer = NestedContainer::new();
    let ready = explorer.ready_signal();
    let explorer_key = shell
        .add_nested(
            explorer,
            Region::Center,
            PanelOptions::new().id("explorer").title("Files"),
        )
        .ok_or_else(|| anyhow!("Failed to dock explorer"))?;
    if !ready.wait().await {
        return Err(anyhow!("Explorer was dropped before it mounted"));
    }

    let details = populate_explorer(&mut shell, explorer_key)?;
    print_frame("Shell", &shell.layout(WINDOW));

    let center = shell
        .layout(WINDOW)
        .region(Region::Center)
        .ok_or_else(|| anyhow!("Shell center is not visible"))?;
    let inner = shell
        .panel_mut(explorer_key)
        .and_then(|panel| panel.as_nested_mut())
        .and_then(NestedContainer::container_mut)
        .ok_or_else(|| anyhow!("Explorer panel has no inner container"))?;

    print_frame("Explorer", &inner.layout(center));

    // Drag the folder tree's edge 80px to the right, in small steps
    let edge = inner
        .layout(center)
        .resizer(Region::Left)
        .ok_or_else(|| anyhow!("Folder tree has no resizer"))?;
    let grab = Point::new(edge.x + edge.width / 2.0, edge.y + edge.height / 2.0);
    inner.handle_pointer(center, PointerEvent::Down { pointer: MOUSE, position: grab });
    for step in 1..=8 {
        let position = Point::new(grab.x + step as f32 * 10.0, grab.y);
        inner.handle_pointer(center, PointerEvent::Move { pointer: MOUSE, position });
    }
    inner.handle_pointer(center, PointerEvent::Up { pointer: MOUSE });

    inner.toggle_collapse("tree");
    inner.toggle_collapse("tree");
    inner.close_panel(details);

    print_frame("Explorer after resize", &inner.layout(center));
    drain_events(&mut events);

    if shell.move_panel("status", Region::Top) {
        tracing::info!("Status bar docked at top");
    }
    print_frame("Shell after move", &shell.layout(WINDOW));

    Ok(())
}
