// DOM contract between the static pages and the motion layer.
//
// Ids name singletons, data attributes mark repeatable bindings.

// Cursor
pub const CURSOR_ROOT_ID: &str = "cursor";
pub const CURSOR_DOT_ID: &str = "cursor-dot";
pub const CURSOR_RING_ID: &str = "cursor-ring";
pub const CURSOR_GLYPH_ID: &str = "cursor-glyph";
pub const CURSOR_SPARKS_ID: &str = "cursor-sparks";
pub const ATTR_CURSOR: &str = "data-cursor";
pub const ATTR_CURSOR_REGION: &str = "data-cursor-region";

// Hero
pub const HERO_ID: &str = "hero";
pub const HERO_CTA_ID: &str = "hero-cta";
pub const HERO_WING_SELECTOR: &str = "[data-hero-wing]";
pub const HERO_WING_ZONE_SELECTOR: &str = "[data-hero-wing-zone]";
pub const HERO_LAYER_SELECTOR: &str = "[data-hero-layer]";
pub const HERO_DOODLE_SELECTOR: &str = "[data-hero-doodle]";
pub const HERO_SPOTLIGHT_ID: &str = "hero-spotlight";
pub const HERO_PLANE_ID: &str = "hero-plane";
pub const HERO_PARTICLES_ID: &str = "hero-particles";

// Reveals
pub const REVEAL_SELECTOR: &str = "[data-reveal]";
pub const REVEAL_LINE_SELECTOR: &str = "[data-reveal-line]";
pub const REVEAL_CURTAIN_CLASS: &str = "reveal-curtain";
pub const FADE_UP_SELECTOR: &str = "[data-fade-up]";

// Pinned sections. Panels sit side by side in one row; each is shifted by
// a percentage of its own width, so the row needs no fixed width.
pub const PIN_SELECTOR: &str = "[data-pin]";
pub const PIN_PANEL_SELECTOR: &str = "[data-pin-panel]";
pub const PIN_PARALLAX_SELECTOR: &str = "[data-parallax]";
pub const PIN_TEXT_SELECTOR: &str = "[data-pin-text]";

// Loader, carousel, contact, CTA
pub const LOADER_ID: &str = "loader";
pub const CAROUSEL_SELECTOR: &str = "[data-carousel]";
pub const CAROUSEL_TRACK_SELECTOR: &str = "[data-carousel-track]";
pub const CONTACT_FORM_ID: &str = "contact-form";
pub const CONTACT_STATUS_ID: &str = "contact-status";
pub const CTA_SELECTOR: &str = "[data-cta]";
pub const ATTR_SOCIAL: &str = "data-social";

// Fluid background
pub const FLUID_CANVAS_ID: &str = "fluid-canvas";
pub const FLUID_BACKGROUND_ATTR: &str = "data-background";
pub const FLUID_SIM_DIVISOR: u32 = 2; // simulation runs at half the canvas resolution

// Misc
pub const MAX_FRAME_DT_MS: f64 = 100.0; // clamp after tab switches
