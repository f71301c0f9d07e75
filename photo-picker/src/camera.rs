// Camera capture for the "take photo" tile.
//
// On Android the capture runs through JNI calls into the app's MainActivity.
// On other platforms the system camera reports itself as unavailable and the
// picker shows its "no camera" alert instead.

use std::sync::Arc;

use crate::error::PickerError;
use crate::models::ImageData;

/// Result of a finished camera session
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedPhoto {
    pub edited_image: ImageData,
    /// Where the capture was stored; becomes the picked image's URL
    pub reference_url: String,
}

/// Capability interface of a camera
pub trait CameraCapture: Send + Sync {
    fn is_available(&self) -> bool;

    /// Present the camera and block until the user took a photo or gave up
    fn capture(&self) -> Result<CapturedPhoto, PickerError>;
}

/// Shared camera reference usable as a component property
#[derive(Clone)]
pub struct CameraHandle(pub Arc<dyn CameraCapture>);

impl CameraHandle {
    pub fn new(camera: impl CameraCapture + 'static) -> Self {
        Self(Arc::new(camera))
    }
}

impl PartialEq for CameraHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Run a capture session without blocking the async runtime
pub async fn capture_photo(camera: Arc<dyn CameraCapture>) -> Result<CapturedPhoto, PickerError> {
    tokio::task::spawn_blocking(move || camera.capture())
        .await
        .map_err(|e| PickerError::Other(format!("Task join error: {}", e)))?
}

const DEFAULT_MAIN_ACTIVITY_CLASS: &str = "dev/dioxus/main/MainActivity";

/// The device camera
#[derive(Debug, Clone)]
pub struct SystemCamera {
    /// Fully qualified activity class in slash format (e.g. "com/example/app/MainActivity")
    pub main_activity_class: String,
    /// Longest wait for the camera activity to report back
    pub timeout: std::time::Duration,
}

impl Default for SystemCamera {
    fn default() -> Self {
        Self {
            main_activity_class: DEFAULT_MAIN_ACTIVITY_CLASS.to_string(),
            timeout: std::time::Duration::from_secs(60),
        }
    }
}

#[cfg(not(target_os = "android"))]
impl CameraCapture for SystemCamera {
    fn is_available(&self) -> bool {
        false
    }

    fn capture(&self) -> Result<CapturedPhoto, PickerError> {
        Err(PickerError::PlatformNotSupported(
            "Camera not available on this platform".to_string(),
        ))
    }
}

#[cfg(target_os = "android")]
impl CameraCapture for SystemCamera {
    fn is_available(&self) -> bool {
        match android::has_camera(self) {
            Ok(available) => available,
            Err(e) => {
                log::warn!("Camera availability check failed: {}", e);
                false
            }
        }
    }

    fn capture(&self) -> Result<CapturedPhoto, PickerError> {
        let path = android::capture_photo(self)?;
        log::info!("Camera captured {:?}", path);

        let edited_image = crate::thumbnail::read_original(&path)?;
        Ok(CapturedPhoto {
            edited_image,
            reference_url: crate::models::file_url(&path),
        })
    }
}

#[cfg(target_os = "android")]
mod android {
    use super::SystemCamera;
    use crate::error::PickerError;
    use jni::objects::{JClass, JObject, JString, JValue};
    use jni::JNIEnv;
    use ndk_context::android_context;
    use std::path::PathBuf;

    fn jni_err(context: &str) -> impl Fn(jni::errors::Error) -> PickerError + '_ {
        move |e| PickerError::Other(format!("{} failed: {}", context, e))
    }

    fn with_env<T>(
        f: impl FnOnce(&mut JNIEnv) -> Result<T, PickerError>,
    ) -> Result<T, PickerError> {
        let vm_ptr = android_context().vm() as *mut *const jni::sys::JNIInvokeInterface_;
        let vm = unsafe { jni::JavaVM::from_raw(vm_ptr) }.map_err(jni_err("JavaVM"))?;
        let mut env = vm.attach_current_thread().map_err(jni_err("JNI attach"))?;
        f(&mut env)
    }

    /// Load the activity class through the application class loader
    fn activity_class<'a>(
        env: &mut JNIEnv<'a>,
        class_name: &str,
    ) -> Result<JClass<'a>, PickerError> {
        let at_cls = env
            .find_class("android/app/ActivityThread")
            .map_err(jni_err("ActivityThread lookup"))?;
        let thread = env
            .call_static_method(
                &at_cls,
                "currentActivityThread",
                "()Landroid/app/ActivityThread;",
                &[],
            )
            .and_then(|v| v.l())
            .map_err(jni_err("currentActivityThread"))?;
        let app = env
            .call_method(&thread, "getApplication", "()Landroid/app/Application;", &[])
            .and_then(|v| v.l())
            .map_err(jni_err("getApplication"))?;
        let loader = env
            .call_method(&app, "getClassLoader", "()Ljava/lang/ClassLoader;", &[])
            .and_then(|v| v.l())
            .map_err(jni_err("getClassLoader"))?;

        let name: JString = env
            .new_string(class_name.replace('/', "."))
            .map_err(jni_err("new_string"))?;
        let cls = env
            .call_method(
                &loader,
                "loadClass",
                "(Ljava/lang/String;)Ljava/lang/Class;",
                &[JValue::Object(&JObject::from(name))],
            )
            .and_then(|v| v.l())
            .map_err(jni_err("loadClass"))?;
        Ok(JClass::from(cls))
    }

    fn activity_instance<'a>(
        env: &mut JNIEnv<'a>,
        camera: &SystemCamera,
    ) -> Result<(JObject<'a>, JClass<'a>), PickerError> {
        let cls = activity_class(env, &camera.main_activity_class)?;
        let signature = format!("()L{};", camera.main_activity_class);
        let instance = env
            .call_static_method(&cls, "getInstance", &signature, &[])
            .and_then(|v| v.l())
            .map_err(jni_err("getInstance"))?;

        if instance.is_null() {
            return Err(PickerError::PlatformNotSupported(
                "MainActivity instance is null - Activity not initialized?".to_string(),
            ));
        }
        Ok((instance, cls))
    }

    fn static_string(
        env: &mut JNIEnv,
        cls: &JClass,
        method: &str,
    ) -> Result<Option<String>, PickerError> {
        let obj = env
            .call_static_method(cls, method, "()Ljava/lang/String;", &[])
            .and_then(|v| v.l())
            .map_err(jni_err(method))?;
        if obj.is_null() {
            return Ok(None);
        }
        let value: String = env
            .get_string((&obj).into())
            .map_err(jni_err("String conversion"))?
            .into();
        Ok(Some(value))
    }

    pub(super) fn has_camera(camera: &SystemCamera) -> Result<bool, PickerError> {
        with_env(|env| {
            let (activity, _cls) = activity_instance(env, camera)?;
            env.call_method(&activity, "hasCameraPermission", "()Z", &[])
                .and_then(|v| v.z())
                .map_err(jni_err("hasCameraPermission"))
        })
    }

    pub(super) fn capture_photo(camera: &SystemCamera) -> Result<PathBuf, PickerError> {
        with_env(|env| {
            let (activity, cls) = activity_instance(env, camera)?;

            env.call_static_method(&cls, "clearLastError", "()V", &[])
                .map_err(jni_err("clearLastError"))?;
            env.call_method(&activity, "launchCamera", "()V", &[])
                .map_err(jni_err("launchCamera"))?;

            let poll = std::time::Duration::from_millis(100);
            let attempts = (camera.timeout.as_millis() / poll.as_millis()).max(1);
            for _ in 0..attempts {
                std::thread::sleep(poll);

                if let Some(path) = static_string(env, &cls, "getLastPhotoPath")? {
                    return Ok(PathBuf::from(path));
                }
                if let Some(err) = static_string(env, &cls, "getLastError")? {
                    return Err(PickerError::Cancelled(err));
                }
            }

            Err(PickerError::Timeout("Camera timeout - no photo taken".to_string()))
        })
    }
}
