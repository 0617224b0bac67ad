use std::cell::{Cell, RefCell};
use std::future::Future;

/// Ordered slideshow sequence; the order defines the circular track.
pub const ASSET_LIST: &[&str] = &[
    "./assets/nestbank/1.jpg",
    "./assets/nestbank/2.jpg",
    "./assets/nestbank/3.png",
    "./assets/nestbank/4.5.mp4",
    "./assets/nestbank/7.png",
    "./assets/nestbank/5.png",
    "./assets/nestbank/9.jpg",
    "./assets/nestbank/11.png",
    "./assets/nestbank/12.5.mp4",
    "./assets/nestbank/4.jpg",
    "./assets/nestbank/6.jpg",
    "./assets/nestbank/16.mp4",
    "./assets/nestbank/12.jpg",
    "./assets/nestbank/17.jpg",
    "./assets/nestbank/20.mp4",
    "./assets/nestbank/19.jpg",
    "./assets/nestbank/8.png",
];

// Media that keeps `object-fit: contain` on small screens
const CONTAIN_FILES: &[&str] = &["3.png", "5.png", "8.png", "11.png", "12.5.mp4", "20.mp4"];

// Give-up times for a single asset (ms)
pub const VIDEO_READY_TIMEOUT_MS: i32 = 7000;
pub const IMAGE_READY_TIMEOUT_MS: i32 = 5000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn from_path(path: &str) -> Self {
        let lower = path.to_ascii_lowercase();
        if lower.ends_with(".mp4") || lower.ends_with(".webm") {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }

    #[inline]
    pub fn ready_timeout_ms(self) -> i32 {
        match self {
            MediaKind::Video => VIDEO_READY_TIMEOUT_MS,
            MediaKind::Image => IMAGE_READY_TIMEOUT_MS,
        }
    }
}

#[inline]
fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

pub fn keeps_contain(path: &str) -> bool {
    let name = file_name(path);
    CONTAIN_FILES.iter().any(|f| name.eq_ignore_ascii_case(f))
}

/// Run `load` over `items` with at most `concurrency` loads in flight.
///
/// Workers pull the next index from a shared cursor, and each result lands
/// at its item's index, so the output order matches `items` no matter which
/// load finishes first.
pub async fn preload_pool<T, F, Fut>(items: &[&str], concurrency: usize, load: F) -> Vec<T>
where
    F: Fn(usize, String) -> Fut,
    Fut: Future<Output = T>,
{
    let n = items.len();
    let cursor = Cell::new(0usize);
    let slots: RefCell<Vec<Option<T>>> = RefCell::new((0..n).map(|_| None).collect());
    let workers = {
        let (cursor, slots, load) = (&cursor, &slots, &load);
        (0..concurrency.clamp(1, n.max(1))).map(move |_| async move {
            loop {
                let i = cursor.get();
                if i >= n {
                    break;
                }
                cursor.set(i + 1);
                let out = load(i, items[i].to_string()).await;
                slots.borrow_mut()[i] = Some(out);
            }
        })
    };
    futures::future::join_all(workers).await;
    slots.into_inner().into_iter().flatten().collect()
}
