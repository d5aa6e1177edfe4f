// Routes, page metadata and external link targets.

use super::lifecycle::Subsystem;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Programs,
    About,
    Contact,
    Privacy,
    Terms,
    Menu,
}

impl Route {
    pub const ALL: [Route; 7] = [
        Route::Home,
        Route::Programs,
        Route::About,
        Route::Contact,
        Route::Privacy,
        Route::Terms,
        Route::Menu,
    ];

    /// Unknown paths fall back to the home page's behavior.
    pub fn from_path(path: &str) -> Route {
        let p = path
            .trim_end_matches('/')
            .trim_end_matches(".html")
            .trim_end_matches("/index");
        match p {
            "" | "/" | "/index" => Route::Home,
            "/programs" => Route::Programs,
            "/about" | "/team" => Route::About,
            "/contact" => Route::Contact,
            "/privacy" | "/privacy-policy" => Route::Privacy,
            "/terms" | "/terms-of-service" => Route::Terms,
            "/menu" => Route::Menu,
            _ => Route::Home,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Programs => "/programs",
            Route::About => "/about",
            Route::Contact => "/contact",
            Route::Privacy => "/privacy",
            Route::Terms => "/terms",
            Route::Menu => "/menu",
        }
    }

    /// Motion subsystems the page uses, in mount order.
    pub fn subsystems(self) -> &'static [Subsystem] {
        use Subsystem::*;
        match self {
            Route::Home => &[
                Cursor, Loader, Hero, Fluid, Reveals, Pins, Carousel, Cta,
            ],
            Route::Programs => &[Cursor, Reveals, Pins, Cta],
            Route::About => &[Cursor, Reveals, Carousel, Cta],
            Route::Contact => &[Cursor, Reveals, ContactForm],
            Route::Privacy | Route::Terms => &[Cursor, Reveals],
            Route::Menu => &[Cursor, Reveals, Cta],
        }
    }

    pub fn meta(self, config: &SiteConfig) -> PageMeta {
        let title = match self {
            Route::Home => config.title.to_string(),
            Route::Programs => format!("Programs | {}", config.title),
            Route::About => format!("Our Team | {}", config.title),
            Route::Contact => format!("Contact | {}", config.title),
            Route::Privacy => format!("Privacy Policy | {}", config.title),
            Route::Terms => format!("Terms of Service | {}", config.title),
            Route::Menu => format!("Menu | {}", config.title),
        };
        PageMeta {
            title,
            description: config.description.to_string(),
            image: config.social_image.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub image: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Social {
    Instagram,
    LinkedIn,
    YouTube,
}

impl Social {
    /// Value of a `data-social` marker.
    pub fn from_key(key: &str) -> Option<Social> {
        match key.trim().to_ascii_lowercase().as_str() {
            "instagram" => Some(Social::Instagram),
            "linkedin" => Some(Social::LinkedIn),
            "youtube" => Some(Social::YouTube),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub title: &'static str,
    pub description: &'static str,
    pub social_image: &'static str,
    pub form_url: String,
    pub socials: Vec<(Social, &'static str)>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Ascend Mentorship",
            description: "One-on-one mentorship that helps students research, build and lead.",
            social_image: "/og-image.png",
            form_url: "https://forms.gle/ascend-mentorship-apply".to_string(),
            socials: vec![
                (Social::Instagram, "https://www.instagram.com/ascendmentorship"),
                (Social::LinkedIn, "https://www.linkedin.com/company/ascendmentorship"),
                (Social::YouTube, "https://www.youtube.com/@ascendmentorship"),
            ],
        }
    }
}

impl SiteConfig {
    /// Apply a `data-form-url` override if it looks like an absolute URL.
    pub fn with_form_url(mut self, url: Option<&str>) -> Self {
        if let Some(u) = url.map(str::trim) {
            if u.starts_with("https://") || u.starts_with("http://") {
                self.form_url = u.to_string();
            } else if !u.is_empty() {
                log::warn!("[cta] ignoring non-absolute form url {:?}", u);
            }
        }
        self
    }

    pub fn social_url(&self, which: Social) -> Option<&'static str> {
        self.socials.iter().find(|(s, _)| *s == which).map(|(_, u)| *u)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavTarget {
    pub url: String,
    pub new_context: bool,
}

/// Primary call-to-action destination. Independent of any hover or
/// animation state by construction.
pub fn cta_target(config: &SiteConfig) -> NavTarget {
    NavTarget {
        url: config.form_url.clone(),
        new_context: true,
    }
}
