//! System tray icon acting as the persistent status surface.
//!
//! Shows elapsed time in the tooltip, switches icon colour with the
//! recording state, and offers Start, Pause/Resume, Stop and Exit.

use crate::{AppError, AppResult, TrayIconState, TrayStatus};

use std::panic::Location;

use error_location::ErrorLocation;
use image::{Rgba, RgbaImage};
use tracing::{info, instrument};
use tray_icon::menu::{Menu, MenuId, MenuItem, PredefinedMenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

const ICON_SIZE: u32 = 32;

/// Menu item ids the async side matches tray events against.
#[derive(Debug, Clone)]
pub struct TrayMenuIds {
    /// "Start recording".
    pub start: MenuId,
    /// "Pause" / "Resume".
    pub toggle: MenuId,
    /// "Stop".
    pub stop: MenuId,
    /// "Exit".
    pub exit: MenuId,
}

/// System tray icon manager.
pub struct TrayManager {
    tray_icon: TrayIcon,
    start_item: MenuItem,
    toggle_item: MenuItem,
    stop_item: MenuItem,
    ids: TrayMenuIds,
}

impl TrayManager {
    /// Create a new tray manager showing the idle state.
    #[track_caller]
    #[instrument]
    pub fn new() -> AppResult<Self> {
        let menu = Menu::new();

        let start_item = MenuItem::new("Start recording", true, None);
        let toggle_item = MenuItem::new("Pause", false, None);
        let stop_item = MenuItem::new("Stop", false, None);
        let exit_item = MenuItem::new("Exit", true, None);

        let ids = TrayMenuIds {
            start: start_item.id().clone(),
            toggle: toggle_item.id().clone(),
            stop: stop_item.id().clone(),
            exit: exit_item.id().clone(),
        };

        let separator = PredefinedMenuItem::separator();
        menu.append_items(&[
            &start_item,
            &toggle_item,
            &stop_item,
            &separator,
            &exit_item,
        ])
        .map_err(|e| AppError::TrayError {
            reason: format!("Failed to build tray menu: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let idle = TrayStatus::idle();
        let tray_icon = TrayIconBuilder::new()
            .with_tooltip(&idle.tooltip)
            .with_menu(Box::new(menu))
            .with_icon(Self::build_icon(idle.icon)?)
            .build()
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to create tray icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!("System tray icon initialized");

        Ok(Self {
            tray_icon,
            start_item,
            toggle_item,
            stop_item,
            ids,
        })
    }

    /// Redraw icon, tooltip and menu for a new status.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn update(&mut self, status: &TrayStatus) -> AppResult<()> {
        self.tray_icon
            .set_icon(Some(Self::build_icon(status.icon)?))
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to update icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.tray_icon
            .set_tooltip(Some(&status.tooltip))
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to update tooltip: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let active = status.action.is_some();
        self.start_item.set_enabled(!active);
        self.stop_item.set_enabled(active);
        self.toggle_item.set_enabled(active);
        if let Some(action) = status.action {
            self.toggle_item.set_text(action.as_str());
        }

        Ok(())
    }

    /// Draws a filled circle in the state's colour.
    #[track_caller]
    fn build_icon(state: TrayIconState) -> AppResult<Icon> {
        let color = Rgba(state.color());
        let center = (ICON_SIZE as f32 - 1.0) / 2.0;
        let radius = ICON_SIZE as f32 / 2.0 - 2.0;

        let img = RgbaImage::from_fn(ICON_SIZE, ICON_SIZE, |x, y| {
            let (dx, dy) = (x as f32 - center, y as f32 - center);
            if dx * dx + dy * dy <= radius * radius {
                color
            } else {
                Rgba([0, 0, 0, 0])
            }
        });

        let (width, height) = img.dimensions();

        Icon::from_rgba(img.into_raw(), width, height).map_err(|e| AppError::TrayError {
            reason: format!("Failed to create icon from RGBA: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Menu item ids for event matching.
    pub fn menu_ids(&self) -> &TrayMenuIds {
        &self.ids
    }
}
