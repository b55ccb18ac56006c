use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{MouseEvent, MouseEventKind};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use tracing::{debug, info};

use kinetic_core::motion::progress::page_progress;
use kinetic_core::motion::{
    Bounds, MagneticPull, MotionPreset, Normalization, PointerTilt, PointerTracker, PresetInput,
    ProgressAnimator, Region, ScrollTracker, SmoothScroll, StyleFrame, StyleProperty, Viewport,
};
use kinetic_core::scramble::{Alphabet, Scramble, ScrambleDriver, WordCycle};
use kinetic_core::AppConfig;

use crate::input::Action;
use crate::theme::Theme;

/// Page pixels per terminal row
pub const ROW_PX: f64 = 20.0;
/// Page pixels per terminal column
pub const COL_PX: f64 = 10.0;

pub const BRAND: &str = "KINETIC";
pub const NAV_GAP: u16 = 3;

/// Headline scramble resolves a third of a character per 30ms tick
const HEADLINE_STEP: f64 = 1.0 / 3.0;
const HEADLINE_TICK: Duration = Duration::from_millis(30);

/// Longest frame step fed to springs (after a stall or refocus)
const MAX_FRAME_DT: Duration = Duration::from_millis(100);

/// One line of section content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Content {
    Title(&'static str),
    Text(&'static str),
    /// The rotating scrambled headline word
    Headline,
    /// Magnetic call-to-action button
    Cta(&'static str),
    Blank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Hero,
    About,
    Services,
    Work,
    Process,
    Footer,
}

impl SectionKind {
    pub const ALL: [SectionKind; 6] = [
        SectionKind::Hero,
        SectionKind::About,
        SectionKind::Services,
        SectionKind::Work,
        SectionKind::Process,
        SectionKind::Footer,
    ];

    /// Label of the nav link pointing here, if any
    pub fn nav_label(&self) -> Option<&'static str> {
        match self {
            SectionKind::Hero => Some("Home"),
            SectionKind::About => Some("About"),
            SectionKind::Services => Some("Services"),
            SectionKind::Work => Some("Work"),
            SectionKind::Process => Some("Process"),
            SectionKind::Footer => None,
        }
    }

    fn height(&self) -> u16 {
        match self {
            SectionKind::Hero => 24,
            SectionKind::About | SectionKind::Services | SectionKind::Process => 20,
            SectionKind::Work => 24,
            SectionKind::Footer => 12,
        }
    }

    fn content(&self) -> &'static [Content] {
        use Content::*;
        match self {
            SectionKind::Hero => &[
                Blank,
                Blank,
                Title("KINETIC STUDIO"),
                Blank,
                Text("We craft digital experiences that feel"),
                Headline,
                Blank,
                Text("Move the pointer across this block to tilt it."),
                Text("Scroll to watch it fade out."),
            ],
            SectionKind::About => &[
                Title("About"),
                Blank,
                Text("DESIGN  *  MOTION  *  ENGINEERING  *  STRATEGY  *  DESIGN  *  MOTION"),
                Text("STRATEGY  *  ENGINEERING  *  MOTION  *  DESIGN  *  STRATEGY  *  ENGINEERING"),
                Blank,
                Text("A small studio building fast, expressive web products."),
            ],
            SectionKind::Services => &[
                Title("Services"),
                Blank,
                Text("01  Web Infrastructure"),
                Text("02  Digital Branding"),
                Text("03  SEO Systems"),
                Text("04  Growth Logic"),
            ],
            SectionKind::Work => &[
                Title("Selected Work"),
                Blank,
                Text("Aurora Banking       fintech / 2024"),
                Text("Helix Health         platform / 2024"),
                Text("Northwind Supply     commerce / 2023"),
                Blank,
                Text("Each row slides across while the section is on screen."),
            ],
            SectionKind::Process => &[
                Title("Process"),
                Blank,
                Text("Discover  ->  Design  ->  Build  ->  Launch"),
                Blank,
                Cta("[ Start a project ]"),
            ],
            SectionKind::Footer => &[
                Title("Let's build something."),
                Blank,
                Text("About Studio  /  Our Process  /  Contact Hub"),
                Text("(c) Kinetic Studio"),
            ],
        }
    }

    fn preset(&self) -> MotionPreset {
        match self {
            SectionKind::Hero => MotionPreset::hero_fade(),
            SectionKind::About => MotionPreset::marquee(true),
            SectionKind::Services => MotionPreset::featured_parallax(true),
            SectionKind::Work => MotionPreset::work_showcase(),
            SectionKind::Process => MotionPreset::cta_lift(),
            SectionKind::Footer => MotionPreset::footer_reveal(),
        }
    }
}

/// A page section with its own scroll-linked animation
pub struct Section {
    pub kind: SectionKind,
    pub content: &'static [Content],
    /// First document row
    pub top: u16,
    pub height: u16,
    input: PresetInput,
    tracker: Option<ScrollTracker>,
    animator: ProgressAnimator,
    /// Style produced by the last frame
    pub style: StyleFrame,
}

impl Section {
    fn new(kind: SectionKind, top: u16) -> Result<Self> {
        let preset = kind.preset();
        let height = kind.height();
        let tracker = match preset.input {
            PresetInput::Region(offset) => Some(ScrollTracker::region(
                Region::new(top as f64 * ROW_PX, height as f64 * ROW_PX),
                offset,
            )),
            PresetInput::PageOffset | PresetInput::PageProgress => None,
        };
        let animator = preset.build()?;
        let style = animator.current();
        Ok(Self {
            kind,
            content: kind.content(),
            top,
            height,
            input: preset.input,
            tracker,
            animator,
            style,
        })
    }

    pub fn bottom(&self) -> u16 {
        self.top + self.height
    }

    /// Latest progress fed to the animator
    pub fn progress(&self) -> f64 {
        self.animator.progress()
    }

    fn advance(&mut self, viewport: &Viewport, dt: Duration) {
        let input = match (&self.input, self.tracker.as_mut()) {
            (PresetInput::PageOffset, _) => viewport.scroll_y,
            (PresetInput::Region(_), Some(tracker)) => tracker.update(viewport),
            (PresetInput::Region(_), None) | (PresetInput::PageProgress, _) => {
                page_progress(viewport)
            }
        };
        self.animator.set_progress(input);
        self.style = self.animator.advance(dt);
    }

    /// Whole rows the section is shifted down by its translate
    pub fn shift_rows(&self) -> i32 {
        (self.style.get(StyleProperty::TranslateY) / ROW_PX).round() as i32
    }

    /// Whole columns the section is shifted right by its translate
    pub fn shift_cols(&self) -> i32 {
        (self.style.get(StyleProperty::TranslateX) / COL_PX).round() as i32
    }

    /// Screen row of content line `line`, if it falls inside `body`
    pub fn screen_row(&self, line: u16, scroll: u16, body: Rect) -> Option<u16> {
        let row = self.top as i32 + line as i32 + self.shift_rows() - scroll as i32;
        if row < 0 || row >= body.height as i32 {
            return None;
        }
        Some(body.y + row as u16)
    }
}

/// A nav link whose label scrambles while hovered
pub struct NavLink {
    pub label: &'static str,
    /// Index into `App::sections`
    pub section: usize,
    pub driver: ScrambleDriver,
}

/// Screen regions, recomputed on resize
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenAreas {
    pub nav: Rect,
    pub progress: Rect,
    pub body: Rect,
    pub status: Rect,
}

impl ScreenAreas {
    pub fn split(size: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Nav bar
                Constraint::Length(1), // Progress bar
                Constraint::Min(1),    // Page
                Constraint::Length(1), // Status bar
            ])
            .split(size);
        Self {
            nav: rows[0],
            progress: rows[1],
            body: rows[2],
            status: rows[3],
        }
    }
}

/// Application state
pub struct App {
    /// Application configuration
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub sections: Vec<Section>,
    pub nav: Vec<NavLink>,
    /// Hovered or keyboard-focused nav link
    pub nav_focus: Option<usize>,
    /// Scrambled headline word in the hero
    pub headline: ScrambleDriver,
    headline_words: WordCycle,
    pub scroll: SmoothScroll,
    progress_bar: ProgressAnimator,
    /// Spring-smoothed reading progress, `scale` in [0, 1]
    pub progress_style: StyleFrame,
    hero_pointer: PointerTracker,
    tilt: PointerTilt,
    /// (rotate_x, rotate_y) of the hero block in degrees
    pub tilt_degrees: (f64, f64),
    cta_pointer: PointerTracker,
    cta_magnet: MagneticPull,
    pub areas: ScreenAreas,
    /// False while the terminal is unfocused; frames are skipped
    pub visible: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Pending key for multi-key sequences (e.g., 'gg')
    pub pending_key: Option<char>,
    /// Status message
    pub status_message: Option<String>,
    last_frame: Option<Instant>,
}

impl App {
    pub fn new(config: Arc<AppConfig>, theme: Theme) -> Result<Self> {
        let mut sections = Vec::with_capacity(SectionKind::ALL.len());
        let mut top = 0;
        for kind in SectionKind::ALL {
            let section = Section::new(kind, top)?;
            top = section.bottom();
            sections.push(section);
        }

        let mut nav = Vec::new();
        for (index, section) in sections.iter().enumerate() {
            if let Some(label) = section.kind.nav_label() {
                nav.push(NavLink {
                    label,
                    section: index,
                    driver: config.scramble.driver(label)?,
                });
            }
        }

        let headline_words = config.scramble.headline()?;
        let headline = ScrambleDriver::new(
            Scramble::new(headline_words.current(), Alphabet::extended(), HEADLINE_STEP)?,
            HEADLINE_TICK,
        );

        let progress_bar = MotionPreset::page_progress_bar().build()?;
        let progress_style = progress_bar.current();

        Ok(Self {
            scroll: SmoothScroll::new(config.scroll.clone()),
            tilt: PointerTilt::new(5.0, config.spring)?,
            cta_magnet: MagneticPull::new(config.spring),
            config,
            theme,
            sections,
            nav,
            nav_focus: None,
            headline,
            headline_words,
            progress_bar,
            progress_style,
            hero_pointer: PointerTracker::new(Bounds::default(), Normalization::Centered),
            tilt_degrees: (0.0, 0.0),
            cta_pointer: PointerTracker::new(Bounds::default(), Normalization::Unit),
            areas: ScreenAreas::default(),
            visible: true,
            should_quit: false,
            pending_key: None,
            status_message: None,
            last_frame: None,
        })
    }

    /// Start the headline rotation; without a tokio runtime words swap unanimated
    pub fn start(&mut self, now: Instant) {
        self.headline_words.start(now);
        self.headline.trigger_enter();
        self.last_frame = Some(now);
        info!(sections = self.sections.len(), "Preview started");
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.areas = ScreenAreas::split(Rect::new(0, 0, width, height));
        let max = self.max_scroll();
        if self.scroll.current() > max {
            self.scroll.jump_to(max, max);
        }
    }

    pub fn document_height(&self) -> u16 {
        self.sections.last().map(|s| s.bottom()).unwrap_or(0)
    }

    /// Largest scroll offset in rows
    pub fn max_scroll(&self) -> f64 {
        (self.document_height() as f64 - self.areas.body.height as f64).max(0.0)
    }

    /// Visible scroll offset in whole rows
    pub fn scroll_offset(&self) -> u16 {
        self.scroll.current().round().max(0.0) as u16
    }

    /// The page geometry in page pixels
    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            self.scroll.current() * ROW_PX,
            self.areas.body.height as f64 * ROW_PX,
            self.document_height() as f64 * ROW_PX,
        )
    }

    /// Section under the upper third of the page
    pub fn current_section(&self) -> usize {
        let probe = self.scroll.current() + self.areas.body.height as f64 / 3.0;
        self.sections
            .iter()
            .position(|s| probe < s.bottom() as f64)
            .unwrap_or(self.sections.len().saturating_sub(1))
    }

    /// Whether the next frame should come at the animation rate
    pub fn is_animating(&self) -> bool {
        self.visible
            && (self.scroll.needs_update()
                || !self.progress_bar.is_settled()
                || !self.tilt.is_settled()
                || !self.cta_magnet.is_settled()
                || self.headline.is_running()
                || self.nav.iter().any(|link| link.driver.is_running()))
    }

    /// Terminal focus changed
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        debug!(visible, "Preview visibility changed");
        if visible {
            self.headline.trigger_enter();
        } else {
            self.set_nav_focus(None);
            self.headline.trigger_exit();
        }
    }

    /// Move hover to another nav link; the old link stops scrambling
    pub fn set_nav_focus(&mut self, focus: Option<usize>) {
        let focus = focus.filter(|i| *i < self.nav.len());
        if focus == self.nav_focus {
            return;
        }
        if let Some(previous) = self.nav_focus {
            self.nav[previous].driver.trigger_exit();
        }
        if let Some(next) = focus {
            self.nav[next].driver.trigger_enter();
        }
        self.nav_focus = focus;
    }

    pub fn apply(&mut self, action: Action) {
        if action != Action::PendingG {
            self.pending_key = None;
        }
        let max = self.max_scroll();
        let page = self.areas.body.height as f64;

        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollDown => self.scroll.scroll_down(max),
            Action::ScrollUp => self.scroll.scroll_up(max),
            Action::HalfPageDown => self.scroll.scroll_half_page_down(page, max),
            Action::HalfPageUp => self.scroll.scroll_half_page_up(page, max),
            Action::JumpToTop => self.scroll.scroll_to(0.0, max),
            Action::JumpToBottom => self.scroll.scroll_to(max, max),
            Action::PendingG => self.pending_key = Some('g'),
            Action::JumpToSection(index) => self.jump_to_nav(index),
            Action::NextNavFocus => {
                let next = match self.nav_focus {
                    Some(i) => (i + 1) % self.nav.len(),
                    None => 0,
                };
                self.set_nav_focus(Some(next));
            }
            Action::PrevNavFocus => {
                let prev = match self.nav_focus {
                    Some(0) | None => self.nav.len().saturating_sub(1),
                    Some(i) => i - 1,
                };
                self.set_nav_focus(Some(prev));
            }
            Action::ClearNavFocus => self.set_nav_focus(None),
            Action::Activate => {
                if let Some(index) = self.nav_focus {
                    self.jump_to_nav(index);
                }
            }
            Action::None => {}
        }
    }

    fn jump_to_nav(&mut self, index: usize) {
        let Some(link) = self.nav.get(index) else {
            return;
        };
        let top = self.sections[link.section].top as f64;
        let label = link.label;
        let max = self.max_scroll();
        self.scroll.scroll_to(top, max);
        self.set_status(format!("-> {}", label));
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let max = self.max_scroll();
        let lines = self.config.scroll.scroll_lines as f64;
        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll.wheel(lines, max),
            MouseEventKind::ScrollUp => self.scroll.wheel(-lines, max),
            MouseEventKind::Down(_) => {
                if let Some(index) = self.nav_link_at(mouse.column, mouse.row) {
                    self.jump_to_nav(index);
                }
            }
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                let hovered = self.nav_link_at(mouse.column, mouse.row);
                self.set_nav_focus(hovered);
                self.pointer_moved(mouse.column, mouse.row);
            }
            _ => {}
        }
    }

    /// Feed the hero tilt and the CTA magnet from a pointer position
    fn pointer_moved(&mut self, column: u16, row: u16) {
        // cell centers, in page pixels
        let px = (column as f64 + 0.5) * COL_PX;
        let py = (row as f64 + 0.5) * ROW_PX;

        match self.hero_area() {
            Some(area) if area_contains(area, column, row) => {
                self.hero_pointer.set_bounds(bounds_px(area));
                let (x, y) = self.hero_pointer.pointer_move(px, py);
                self.tilt.pointer(x, y);
            }
            _ if self.hero_pointer.is_inside() => {
                self.hero_pointer.pointer_leave();
                let (x, y) = self.hero_pointer.position();
                self.tilt.pointer(x, y);
            }
            _ => {}
        }

        match self.cta_area() {
            Some(area) if area_contains(inflate(area, 4, 1), column, row) => {
                self.cta_pointer.set_bounds(bounds_px(area));
                self.cta_pointer.pointer_move(px, py);
            }
            _ => self.cta_pointer.pointer_leave(),
        }
        self.cta_magnet.pull(self.cta_pointer.magnetic_offset());
    }

    /// Nav link hit boxes, left to right after the brand
    pub fn nav_link_areas(&self) -> Vec<Rect> {
        let area = self.areas.nav;
        let right = area.x.saturating_add(area.width);
        let mut x = area.x + BRAND.len() as u16 + NAV_GAP + 1;
        let mut areas = Vec::with_capacity(self.nav.len());
        for link in &self.nav {
            let width = (link.label.chars().count() as u16).min(right.saturating_sub(x));
            areas.push(Rect::new(x.min(right), area.y, width, 1));
            x = x.saturating_add(width + NAV_GAP);
        }
        areas
    }

    pub fn nav_link_at(&self, column: u16, row: u16) -> Option<usize> {
        self.nav_link_areas()
            .iter()
            .position(|r| r.width > 0 && area_contains(*r, column, row))
    }

    /// On-screen part of the hero section
    pub fn hero_area(&self) -> Option<Rect> {
        let hero = self.sections.iter().find(|s| s.kind == SectionKind::Hero)?;
        let body = self.areas.body;
        let scroll = self.scroll_offset() as i32;
        let start = (hero.top as i32 - scroll).max(0);
        let end = (hero.bottom() as i32 - scroll).min(body.height as i32);
        if end <= start {
            return None;
        }
        Some(Rect::new(body.x, body.y + start as u16, body.width, (end - start) as u16))
    }

    /// On-screen rectangle of the call-to-action button, before its magnetic offset
    pub fn cta_area(&self) -> Option<Rect> {
        let body = self.areas.body;
        let scroll = self.scroll_offset();
        self.sections.iter().find_map(|section| {
            section.content.iter().enumerate().find_map(|(line, content)| {
                let Content::Cta(label) = content else {
                    return None;
                };
                let row = section.screen_row(line as u16, scroll, body)?;
                let x = body.x as i32 + CONTENT_INDENT as i32 + section.shift_cols();
                let x = x.clamp(body.x as i32, (body.x + body.width) as i32) as u16;
                let width = (label.chars().count() as u16).min(body.x + body.width - x);
                Some(Rect::new(x, row, width, 1))
            })
        })
    }

    /// Spring-smoothed pull of the CTA toward the pointer, in whole columns
    pub fn cta_offset(&self) -> i32 {
        (self.cta_magnet.offset().0 / COL_PX).round() as i32
    }

    pub fn tilt_settled(&self) -> bool {
        self.tilt.is_settled()
    }

    /// Advance every animation to `now`
    pub fn on_frame(&mut self, now: Instant) {
        let dt = match self.last_frame {
            Some(last) => now.saturating_duration_since(last).min(MAX_FRAME_DT),
            None => Duration::ZERO,
        };
        self.last_frame = Some(now);

        if !self.visible {
            return;
        }

        if let Some(word) = self.headline_words.poll(now) {
            let word = word.to_string();
            debug!(word = %word, "Headline rotated");
            self.headline.retarget(&word);
        }

        let max = self.max_scroll();
        self.scroll.update_at(max, now);

        let viewport = self.viewport();
        for section in &mut self.sections {
            section.advance(&viewport, dt);
        }

        self.progress_bar.set_progress(page_progress(&viewport));
        self.progress_style = self.progress_bar.advance(dt);
        self.tilt_degrees = self.tilt.advance(dt);
        self.cta_magnet.advance(dt);
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

/// Left margin of section content, in columns
pub const CONTENT_INDENT: u16 = 4;

fn area_contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

fn inflate(area: Rect, dx: u16, dy: u16) -> Rect {
    Rect::new(
        area.x.saturating_sub(dx),
        area.y.saturating_sub(dy),
        area.width + dx * 2,
        area.height + dy * 2,
    )
}

fn bounds_px(area: Rect) -> Bounds {
    Bounds::new(
        area.x as f64 * COL_PX,
        area.y as f64 * ROW_PX,
        area.width as f64 * COL_PX,
        area.height as f64 * ROW_PX,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use kinetic_core::scramble::ScramblePhase;
    use kinetic_core::ScrollConfig;

    fn instant_config() -> Arc<AppConfig> {
        Arc::new(AppConfig {
            scroll: ScrollConfig {
                smooth_enabled: false,
                ..ScrollConfig::default()
            },
            ..AppConfig::default()
        })
    }

    fn app(config: Arc<AppConfig>) -> App {
        let mut app = App::new(config, Theme::default()).unwrap();
        app.resize(80, 24);
        app
    }

    fn moved(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Moved,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_sections_stack() {
        let app = app(instant_config());
        assert_eq!(app.sections[0].top, 0);
        for pair in app.sections.windows(2) {
            assert_eq!(pair[0].bottom(), pair[1].top);
        }
        assert_eq!(app.nav.len(), 5);
        assert_eq!(app.areas.body.height, 21);
        assert_eq!(app.max_scroll(), app.document_height() as f64 - 21.0);
    }

    #[test]
    fn test_hero_fades_over_first_300px() {
        let mut app = app(instant_config());
        let now = Instant::now();
        app.on_frame(now);
        assert!((app.sections[0].style.opacity() - 1.0).abs() < 1e-9);

        // 15 rows = 300px
        app.scroll.jump_to(15.0, app.max_scroll());
        app.on_frame(now + Duration::from_millis(16));
        assert!(app.sections[0].style.opacity().abs() < 1e-9);
        assert!((app.sections[0].style.scale() - 0.9).abs() < 1e-9);

        // past the end of the range stays clamped
        app.scroll.jump_to(40.0, app.max_scroll());
        app.on_frame(now + Duration::from_millis(32));
        assert!(app.sections[0].style.opacity().abs() < 1e-9);
    }

    #[test]
    fn test_jump_to_section() {
        let mut app = app(instant_config());
        app.apply(Action::JumpToSection(2));
        app.on_frame(Instant::now());
        assert_eq!(app.scroll.current(), app.sections[2].top as f64);
        assert_eq!(app.current_section(), 2);
        assert_eq!(app.status_message.as_deref(), Some("-> Services"));
    }

    #[test]
    fn test_jump_to_bottom_clamps() {
        let mut app = app(instant_config());
        app.apply(Action::JumpToBottom);
        app.on_frame(Instant::now());
        assert_eq!(app.scroll.current(), app.max_scroll());
        app.apply(Action::ScrollDown);
        app.on_frame(Instant::now());
        assert_eq!(app.scroll.current(), app.max_scroll());
    }

    #[test]
    fn test_progress_bar_springs_toward_page_progress() {
        let mut app = app(instant_config());
        let t0 = Instant::now();
        app.on_frame(t0);
        app.apply(Action::JumpToBottom);

        let mut now = t0;
        let mut last = 0.0;
        for _ in 0..200 {
            now += Duration::from_millis(16);
            app.on_frame(now);
            let scale = app.progress_style.scale();
            assert!(scale >= last - 1e-9);
            assert!(scale <= 1.0 + 1e-9);
            last = scale;
        }
        assert!((last - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_hidden_skips_frames() {
        let mut app = app(instant_config());
        app.visible = false;
        app.apply(Action::JumpToSection(3));
        app.on_frame(Instant::now());
        let before = app.sections[3].progress();
        app.on_frame(Instant::now());
        assert_eq!(app.sections[3].progress(), before);
        assert!(!app.is_animating());
    }

    #[test]
    fn test_pending_g_cleared_by_other_action() {
        let mut app = app(instant_config());
        app.apply(Action::PendingG);
        assert_eq!(app.pending_key, Some('g'));
        app.apply(Action::ScrollDown);
        assert_eq!(app.pending_key, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_nav_focus_scrambles_one_link() {
        let mut app = app(instant_config());
        app.apply(Action::NextNavFocus);
        assert_eq!(app.nav_focus, Some(0));
        assert_eq!(app.nav[0].driver.frame().phase, ScramblePhase::Scrambling);

        app.apply(Action::NextNavFocus);
        assert_eq!(app.nav_focus, Some(1));
        let left = app.nav[0].driver.frame();
        assert_eq!(left.phase, ScramblePhase::Idle);
        assert_eq!(left.text, "Home");
        assert!(app.nav[1].driver.is_running());
        assert!(!app.nav[0].driver.is_running());

        app.apply(Action::ClearNavFocus);
        assert_eq!(app.nav_focus, None);
        assert_eq!(app.nav[1].driver.frame().text, "About");
    }

    #[tokio::test(start_paused = true)]
    async fn test_mouse_hover_over_nav() {
        let mut app = app(instant_config());
        let areas = app.nav_link_areas();
        let work = areas[3];

        app.handle_mouse(moved(work.x, work.y));
        assert_eq!(app.nav_focus, Some(3));

        // moving within the same link does not restart it
        let started = app.nav[3].driver.stats().started();
        app.handle_mouse(moved(work.x + 1, work.y));
        assert_eq!(app.nav[3].driver.stats().started(), started);

        // leaving the bar exits the scramble
        app.handle_mouse(moved(work.x, app.areas.body.y + 2));
        assert_eq!(app.nav_focus, None);
        assert_eq!(app.nav[3].driver.frame().text, "Work");
    }

    #[test]
    fn test_headline_rotation_without_runtime() {
        let mut app = app(instant_config());
        let t0 = Instant::now();
        app.start(t0);
        app.on_frame(t0);
        app.on_frame(t0 + Duration::from_millis(4100));

        let frame = app.headline.frame();
        assert_eq!(frame.phase, ScramblePhase::Resolved);
        assert_eq!(frame.text, app.headline_words.current());
        assert_eq!(app.headline_words.index(), 1);
        assert!(!app.headline.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cta_magnet_springs_toward_pointer() {
        let mut app = app(instant_config());
        app.apply(Action::JumpToSection(4));
        let t0 = Instant::now();
        app.on_frame(t0);
        let area = app.cta_area().unwrap();

        app.handle_mouse(moved(area.x + area.width - 1, area.y));
        let raw = (app.cta_pointer.magnetic_offset().0 / COL_PX).round() as i32;
        assert!(raw > 0);
        assert_eq!(app.cta_offset(), 0);
        assert!(app.is_animating());

        let mut now = t0;
        for _ in 0..120 {
            now += Duration::from_millis(16);
            app.on_frame(now);
        }
        assert_eq!(app.cta_offset(), raw);

        // leaving eases back instead of snapping
        app.handle_mouse(moved(0, app.areas.status.y));
        assert_eq!(app.cta_offset(), raw);
        for _ in 0..120 {
            now += Duration::from_millis(16);
            app.on_frame(now);
        }
        assert_eq!(app.cta_offset(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pointer_over_hero_tilts() {
        let mut app = app(instant_config());
        let hero = app.hero_area().unwrap();
        let t0 = Instant::now();
        app.on_frame(t0);

        // top-right corner
        app.handle_mouse(moved(hero.x + hero.width - 1, hero.y));
        let mut now = t0;
        for _ in 0..120 {
            now += Duration::from_millis(16);
            app.on_frame(now);
        }
        let (rotate_x, rotate_y) = app.tilt_degrees;
        assert!(rotate_y > 4.0 && rotate_y <= 5.0);
        assert!(rotate_x > 3.0 && rotate_x <= 5.0);

        // leaving springs back to rest
        app.handle_mouse(moved(0, app.areas.status.y));
        for _ in 0..240 {
            now += Duration::from_millis(16);
            app.on_frame(now);
        }
        assert!(app.tilt_degrees.0.abs() < 0.05);
        assert!(app.tilt_degrees.1.abs() < 0.05);
    }

    #[test]
    fn test_cta_area_tracks_scroll() {
        let mut app = app(instant_config());
        assert!(app.cta_area().is_none());

        let process = app.sections.iter().position(|s| s.kind == SectionKind::Process).unwrap();
        app.apply(Action::JumpToSection(4));
        app.on_frame(Instant::now());
        let area = app.cta_area().unwrap();
        let expected = app.sections[process].screen_row(4, app.scroll_offset(), app.areas.body);
        assert_eq!(Some(area.y), expected);
        assert_eq!(area.width, "[ Start a project ]".len() as u16);
    }
}
