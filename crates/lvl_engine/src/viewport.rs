use serde::{Deserialize, Serialize};

use crate::{EngineError, Extent, GridPosition, Point, Rect, Result, Section, CELL_SIZE};

/// Zoom limits, configurable through the tool options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomSettings {
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub zoom_step: f32,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            min_zoom: 0.25,
            max_zoom: 4.0,
            zoom_step: 0.25,
        }
    }
}

impl ZoomSettings {
    /// Finite values, `0 < min_zoom <= max_zoom` and a positive step.
    pub fn is_valid(&self) -> bool {
        [self.min_zoom, self.max_zoom, self.zoom_step].iter().all(|v| v.is_finite())
            && self.min_zoom > 0.0
            && self.min_zoom <= self.max_zoom
            && self.zoom_step > 0.0
    }

    /// Falls back to the defaults for invalid settings.
    pub fn validated(self) -> Self {
        if self.is_valid() {
            self
        } else {
            log::warn!("Invalid zoom settings {self:?}, using defaults");
            Self::default()
        }
    }
}

/// Window into the world space of the current section.
///
/// Three coordinate spaces are involved:
/// * screen pixels, relative to the window
/// * world units, continuous and section relative
/// * grid cells, world units quantized to [`CELL_SIZE`]
///
/// `offset` is the pan offset in world units. It is always `<= 0` and clamped so the
/// visible area never leaves the section (as long as the section is larger than the view).
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// Top left corner of the canvas in screen pixels
    pub origin: Point,
    /// Canvas size in screen pixels
    size: Extent,
    /// Section size in world units
    content: Extent,

    offset: Point,
    zoom: f32,
    settings: ZoomSettings,
}

impl Default for Viewport {
    fn default() -> Self {
        let section = Section::default();
        Self {
            origin: Point::default(),
            size: Extent::new(800.0, 600.0),
            content: Extent::new(section.pixel_width() as f32, section.pixel_height() as f32),
            offset: Point::default(),
            zoom: 1.0,
            settings: ZoomSettings::default(),
        }
    }
}

impl Viewport {
    pub fn new(size: Extent, content: Extent, settings: ZoomSettings) -> Self {
        Self {
            size,
            content,
            settings: settings.validated(),
            ..Default::default()
        }
    }

    pub fn for_section(section: &Section, size: Extent, settings: ZoomSettings) -> Self {
        Self::new(size, Extent::new(section.pixel_width() as f32, section.pixel_height() as f32), settings)
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn settings(&self) -> ZoomSettings {
        self.settings
    }

    pub fn size(&self) -> Extent {
        self.size
    }

    pub fn set_size(&mut self, size: Extent) {
        self.size = size;
        self.clamp_offset();
    }

    pub fn content(&self) -> Extent {
        self.content
    }

    /// Called whenever the current section or its size changes.
    pub fn set_content(&mut self, content: Extent) {
        self.content = content;
        self.clamp_offset();
    }

    pub fn screen_to_world(&self, screen: Point) -> Point {
        (screen - self.origin) / self.zoom - self.offset
    }

    pub fn world_to_screen(&self, world: Point) -> Point {
        (world + self.offset) * self.zoom + self.origin
    }

    /// Quantizes with floor division, points left of or above the origin land in negative cells.
    pub fn world_to_grid(world: Point) -> GridPosition {
        let cell = CELL_SIZE as f32;
        GridPosition::from_cell((world.x / cell).floor() as i32, (world.y / cell).floor() as i32)
    }

    pub fn screen_to_grid(&self, screen: Point) -> GridPosition {
        Self::world_to_grid(self.screen_to_world(screen))
    }

    /// World units visible at the current zoom.
    pub fn visible_world_size(&self) -> Extent {
        Extent::new(self.size.width / self.zoom, self.size.height / self.zoom)
    }

    pub fn visible_world_rect(&self) -> Rect {
        Rect::new(Point::new(-self.offset.x, -self.offset.y), self.visible_world_size())
    }

    /// Pans by a delta given in screen pixels.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.offset = self.offset + Point::new(dx, dy) / self.zoom;
        self.clamp_offset();
    }

    /// Centers the view on `target` (world units), e.g. the player during playtest.
    pub fn update(&mut self, target: Rect) {
        let center = target.center();
        let visible = self.visible_world_size();
        self.offset = Point::new(visible.width / 2.0 - center.x, visible.height / 2.0 - center.y);
        self.clamp_offset();
    }

    /// Sets the zoom factor keeping the world point under the canvas center in place.
    ///
    /// # Errors
    ///
    /// Zero, negative and non finite factors are rejected with [`EngineError::InvalidZoom`].
    /// Everything else is clamped into the configured range.
    pub fn set_zoom(&mut self, zoom: f32) -> Result<()> {
        if !zoom.is_finite() || zoom <= 0.0 {
            return Err(EngineError::InvalidZoom { zoom });
        }
        let center_screen = self.origin + Point::new(self.size.width / 2.0, self.size.height / 2.0);
        let center_world = self.screen_to_world(center_screen);

        self.zoom = zoom.clamp(self.settings.min_zoom, self.settings.max_zoom);

        let visible = self.visible_world_size();
        self.offset = Point::new(visible.width / 2.0 - center_world.x, visible.height / 2.0 - center_world.y);
        self.clamp_offset();
        Ok(())
    }

    pub fn zoom_in(&mut self) {
        self.step_zoom(self.settings.zoom_step);
    }

    pub fn zoom_out(&mut self) {
        self.step_zoom(-self.settings.zoom_step);
    }

    pub fn reset_zoom(&mut self) {
        self.step_zoom(1.0 - self.zoom);
    }

    fn step_zoom(&mut self, delta: f32) {
        let zoom = ((self.zoom + delta) * 100.0).round() / 100.0;
        let zoom = zoom.clamp(self.settings.min_zoom, self.settings.max_zoom);
        if let Err(err) = self.set_zoom(zoom) {
            log::warn!("Ignoring zoom step: {err}");
        }
    }

    /// `min(0, max(-(content - visible), offset))` per axis.
    fn clamp_offset(&mut self) {
        let visible = self.visible_world_size();
        self.offset.x = self.offset.x.max(-(self.content.width - visible.width)).min(0.0);
        self.offset.y = self.offset.y.max(-(self.content.height - visible.height)).min(0.0);
    }
}
