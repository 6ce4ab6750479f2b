use pod_core::Route;

pub const DASHBOARD: &str = "/dashboard";
pub const EPISODES: &str = "/dashboard/episodes";
pub const PODCASTS: &str = "/dashboard/podcasts";
pub const PROFILE: &str = "/dashboard/profile";

pub fn route(path: &str) -> Route {
    Route::new(path)
}
