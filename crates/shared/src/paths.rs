use std::path::PathBuf;

const XDG_CONFIG_HOME: &str = "XDG_CONFIG_HOME";
const HOME: &str = "HOME";
const APP_NAME: &str = env!("APP_NAME");

pub fn xdg_config_dir(suffix: &str) -> Option<PathBuf> {
    std::env::var(XDG_CONFIG_HOME)
        .map(|path| join_app_path(path, suffix))
        .map(PathBuf::from)
        .ok()
}

pub fn home_config_dir(suffix: &str) -> Option<PathBuf> {
    std::env::var(HOME)
        .map(|mut path| {
            path.push_str("/.config");
            join_app_path(path, suffix)
        })
        .map(PathBuf::from)
        .ok()
}

fn join_app_path(mut path: String, suffix: &str) -> String {
    path.push('/');
    path.push_str(APP_NAME);
    path.push('/');
    path.push_str(suffix);
    path
}
