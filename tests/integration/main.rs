mod app_navigation;
mod helpers;
mod window_cycle;
