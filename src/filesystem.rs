use std::fs;
use std::path::{Path, PathBuf};

use photo_picker::PickerConfig;

/// Environment variable overriding the photo library root
pub const LIBRARY_ENV: &str = "PHOTO_PICKER_LIBRARY";
const CONFIG_FILE: &str = "picker.toml";

#[cfg(target_os = "android")]
fn android_files_dir() -> Option<PathBuf> {
    use jni::{
        objects::{JObject, JString},
        JavaVM,
    };
    unsafe {
        let ctx = ndk_context::android_context();
        let vm = JavaVM::from_raw(ctx.vm().cast()).ok()?;
        let mut env = vm.attach_current_thread().ok()?;
        let activity = JObject::from_raw(ctx.context().cast());
        let files_dir = env
            .call_method(activity, "getFilesDir", "()Ljava/io/File;", &[])
            .ok()?
            .l()
            .ok()?;
        let abs_path_obj = env
            .call_method(files_dir, "getAbsolutePath", "()Ljava/lang/String;", &[])
            .ok()?
            .l()
            .ok()?;
        let abs_path_jstring: JString = JString::from(abs_path_obj);
        let abs_path: String = env.get_string(&abs_path_jstring).ok()?.into();
        Some(PathBuf::from(abs_path))
    }
}

/// Get the app data directory for the current platform
pub fn get_app_data_dir() -> PathBuf {
    #[cfg(target_os = "android")]
    {
        if let Some(dir) = android_files_dir() {
            return dir;
        }
        PathBuf::from("./data")
    }

    #[cfg(not(target_os = "android"))]
    {
        PathBuf::from("./data")
    }
}

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE)
}

/// Library root: the override if set and non-empty, else `<data dir>/photos`
pub fn library_root(data_dir: &Path, override_root: Option<String>) -> PathBuf {
    match override_root {
        Some(root) if !root.trim().is_empty() => PathBuf::from(root.trim()),
        _ => data_dir.join("photos"),
    }
}

/// Picker settings from `picker.toml`, falling back to defaults on any error
pub fn load_config(data_dir: &Path) -> PickerConfig {
    let path = config_path(data_dir);
    match PickerConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Ignoring invalid picker config {:?}: {}", path, e);
            PickerConfig::default()
        }
    }
}

/// Resolve the library root and make sure it exists
pub fn prepare_library_root() -> PathBuf {
    let root = library_root(&get_app_data_dir(), std::env::var(LIBRARY_ENV).ok());
    if let Err(e) = fs::create_dir_all(&root) {
        log::warn!("Could not create library root {:?}: {}", root, e);
    }
    log::info!("Photo library root: {:?}", root);
    root
}
