// DOM contract and page-level timings. Selectors name elements the page
// markup provides; only slideshow layers and detail panels are created here.

// Slideshow root; absent on the home page
pub const BG_ROOT_ID: &str = "bg-sequence";
pub const LAYER_CLASS: &str = "bg-layer";
pub const FIRST_LAYER_CLASS: &str = "bg-first";
pub const KEEP_CONTAIN_CLASS: &str = "keep-contain";

pub const NAV_SELECTOR: &str = ".nav-bar";
pub const CARD_SELECTOR: &str = ".paragraph";
pub const CARD_COLUMN_SELECTOR: &str = ".paragraph-col";
pub const CARD_SCROLLER_SELECTOR: &str = ".paragraph-containers";
pub const DETAIL_CLASS: &str = "paragraph-detail";
pub const DETAIL_SELECTOR: &str = ".paragraph-detail";
pub const DETAIL_INNER_CLASS: &str = "paragraph-detail__inner";
pub const CARD_LABEL_SELECTOR: &str = ".text-label";
pub const CARD_BODY_SELECTOR: &str = ".text-body";

pub const TILE_GRID_SELECTOR: &str = ".tile-grid";
pub const TILE_SELECTOR: &str = ".tile-grid .tile";
pub const TABLIST_SELECTOR: &str = "[role=\"tablist\"]";
pub const TAB_SELECTOR: &str = ".nav-item[role=\"tab\"]";
pub const SPLIT_NAV_SELECTOR: &str = ".nav-split";

// Classes toggled on <html> and on animated elements
pub const PRELOADING_CLASS: &str = "preloading";
pub const UI_EXITED_CLASS: &str = "ui-exited";
pub const THEME_LIGHT_CLASS: &str = "theme-light";
pub const EXIT_OUT: &str = "exit-out";
pub const INTRO_HIDDEN: &str = "intro-hidden";
pub const INTRO_VISIBLE: &str = "intro-visible";
pub const INTRO_TOP_HIDDEN: &str = "intro-top-hidden";
pub const INTRO_TOP_VISIBLE: &str = "intro-top-visible";

// Media queries
pub const SMALL_SCREEN_QUERY: &str = "(max-width: 600px)";
pub const TABLET_QUERY: &str = "(max-width: 1050px)";
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
pub const FINE_HOVER_QUERY: &str = "(hover: hover) and (pointer: fine)";

// Navigation targets of the split nav cards and the first home tile
pub const HOME_HREF: &str = "./index.html";
pub const CASE_STUDY_HREF: &str = "./nestbank.html";
pub const PROFILE_URL: &str = "https://www.linkedin.com/in/josephgreenwood/";

// Start the slideshow even if preloading stalls (ms)
pub const FORCE_START_MS: i32 = 5000;
