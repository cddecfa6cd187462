// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android platform bridge via JNI.
//
// Requires the Android NDK and targets `aarch64-linux-android` or
// `armv7-linux-androideabi`. Each trait method invokes the corresponding
// Android API through JNI calls into the ART runtime.
//
// ## Architecture notes
//
// Methods that can complete synchronously via JNI (SharedPreferences,
// LocationManager.getLastKnownLocation) are fully implemented here.
//
// Methods that require `startActivityForResult` (camera capture, QR scan,
// gallery pick) launch the Intent and return `AbetError::Bridge` explaining
// that the result must be collected through the Activity's
// `onActivityResult` callback. The host Activity is responsible for wiring
// that callback back into Abet — see `ANDROID-INTEGRATION.md` for the
// Kotlin glue code.

#![cfg(target_os = "android")]

use jni::JNIEnv;
use jni::objects::{JObject, JString, JValue};

use abet_core::error::{AbetError, Result};
use abet_core::types::GeoPoint;

use crate::traits::*;

// ---------------------------------------------------------------------------
// JNI bootstrap helpers
// ---------------------------------------------------------------------------

/// Prefix applied to all SharedPreferences keys to avoid collisions.
const PREFS_KEY_PREFIX: &str = "abet_";

/// SharedPreferences file name.
const PREFS_FILE: &str = "abet_secrets";

/// Request codes for `startActivityForResult`. The host Activity must
/// recognise these in its `onActivityResult` override.
pub const REQUEST_CAPTURE_PHOTO: i32 = 0x4142_0001; // "AB" + 1
pub const REQUEST_SCAN_CODE: i32 = 0x4142_0002;
pub const REQUEST_PICK_PHOTO: i32 = 0x4142_0003;

/// Obtain a [`JNIEnv`] handle from the global Android context.
///
/// Calls `ndk_context::android_context()` to retrieve the `JavaVM*` pointer
/// set by `android_main` or `ANativeActivity_onCreate`, then attaches the
/// current thread if it is not already attached.
fn jni_env() -> Result<JNIEnv<'static>> {
    let ctx = ndk_context::android_context();
    // SAFETY: `ctx.vm()` returns the `JavaVM*` set by the NDK glue code.
    // The pointer is guaranteed valid for the lifetime of the process.
    let vm = unsafe { jni::JavaVM::from_raw(ctx.vm().cast()) }
        .map_err(|e| AbetError::Bridge(format!("failed to obtain JavaVM: {e}")))?;
    vm.attach_current_thread()
        .map_err(|e| AbetError::Bridge(format!("failed to attach JNI thread: {e}")))
}

/// Obtain the current Android `Activity` as a [`JObject`].
fn activity() -> Result<JObject<'static>> {
    let ctx = ndk_context::android_context();
    let ptr = ctx.context();
    if ptr.is_null() {
        return Err(AbetError::Bridge(
            "Android context is null — native activity not initialised".into(),
        ));
    }
    // SAFETY: the NDK guarantees this pointer is a valid global jobject for
    // the hosting Activity.
    Ok(unsafe { JObject::from_raw(ptr.cast()) })
}

/// Convenience: map any `jni::errors::Error` into `AbetError::Bridge`.
fn jni_err(context: &str, e: jni::errors::Error) -> AbetError {
    AbetError::Bridge(format!("{context}: {e}"))
}

/// Build an `Intent` for the given action string.
fn new_intent<'a>(env: &mut JNIEnv<'a>, action: &str) -> Result<JObject<'a>> {
    let j_action: JString = env
        .new_string(action)
        .map_err(|e| jni_err("new_string(action)", e))?;
    env.new_object(
        "android/content/Intent",
        "(Ljava/lang/String;)V",
        &[JValue::Object(&j_action)],
    )
    .map_err(|e| jni_err("new Intent", e))
}

/// Dispatch an intent with `startActivityForResult`.
fn start_for_result(
    env: &mut JNIEnv<'_>,
    activity: &JObject<'_>,
    intent: &JObject<'_>,
    request_code: i32,
) -> Result<()> {
    env.call_method(
        activity,
        "startActivityForResult",
        "(Landroid/content/Intent;I)V",
        &[JValue::Object(intent), JValue::Int(request_code)],
    )
    .map_err(|e| jni_err("startActivityForResult", e))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Bridge struct
// ---------------------------------------------------------------------------

/// Android implementation of the Abet platform bridge.
///
/// All methods go through JNI to call the Android SDK. The struct is
/// zero-sized; all state lives on the Java side.
pub struct AndroidBridge;

impl AndroidBridge {
    /// Create a new Android bridge.
    ///
    /// This does **not** touch JNI — the first JNI call happens lazily when
    /// a trait method is invoked.
    pub fn new() -> Self {
        Self
    }
}

impl PlatformBridge for AndroidBridge {
    fn platform_name(&self) -> &str {
        "Android"
    }
}

// ---------------------------------------------------------------------------
// NativeCamera — Intent ACTION_IMAGE_CAPTURE
// ---------------------------------------------------------------------------

impl NativeCamera for AndroidBridge {
    /// Launch the system camera via `MediaStore.ACTION_IMAGE_CAPTURE`.
    ///
    /// This dispatches the capture intent and returns immediately. Because
    /// `startActivityForResult` is inherently asynchronous, the JPEG bytes
    /// are **not** returned from this call. Instead, the host Activity must
    /// override `onActivityResult` with request code [`REQUEST_CAPTURE_PHOTO`]
    /// and forward the result back to Abet.
    fn capture_photo(&self) -> Result<Option<Vec<u8>>> {
        let mut env = jni_env()?;
        let activity = activity()?;

        tracing::info!("Android: launching ACTION_IMAGE_CAPTURE intent");

        let intent = new_intent(&mut env, "android.media.action.IMAGE_CAPTURE")?;
        start_for_result(&mut env, &activity, &intent, REQUEST_CAPTURE_PHOTO)?;

        tracing::info!(
            request_code = REQUEST_CAPTURE_PHOTO,
            "Android: camera intent dispatched — awaiting onActivityResult"
        );

        Err(AbetError::Bridge(
            "Camera intent dispatched (request code 0x41420001). \
             The captured JPEG will arrive via onActivityResult — \
             wire the Activity callback to AbetResultReceiver."
                .into(),
        ))
    }
}

// ---------------------------------------------------------------------------
// NativeBarcodeScanner — ZXing SCAN intent
// ---------------------------------------------------------------------------

impl NativeBarcodeScanner for AndroidBridge {
    /// Launch a QR scanner via the ZXing `com.google.zxing.client.android.SCAN`
    /// intent (served by the embedded journeyapps scanner Activity declared
    /// in the host app's manifest).
    ///
    /// Like camera capture, the decoded payload arrives asynchronously via
    /// `onActivityResult` (request code [`REQUEST_SCAN_CODE`], extra
    /// `SCAN_RESULT`).
    fn scan_code(&self) -> Result<Option<String>> {
        let mut env = jni_env()?;
        let activity = activity()?;

        tracing::info!("Android: launching ZXing SCAN intent");

        let intent = new_intent(&mut env, "com.google.zxing.client.android.SCAN")?;

        // intent.putExtra("SCAN_MODE", "QR_CODE_MODE") — restrict to QR,
        // ID cards do not carry 1D barcodes.
        let j_key: JString = env
            .new_string("SCAN_MODE")
            .map_err(|e| jni_err("new_string(SCAN_MODE)", e))?;
        let j_value: JString = env
            .new_string("QR_CODE_MODE")
            .map_err(|e| jni_err("new_string(QR_CODE_MODE)", e))?;
        env.call_method(
            &intent,
            "putExtra",
            "(Ljava/lang/String;Ljava/lang/String;)Landroid/content/Intent;",
            &[JValue::Object(&j_key), JValue::Object(&j_value)],
        )
        .map_err(|e| jni_err("putExtra(SCAN_MODE)", e))?;

        start_for_result(&mut env, &activity, &intent, REQUEST_SCAN_CODE)?;

        tracing::info!(
            request_code = REQUEST_SCAN_CODE,
            "Android: scan intent dispatched — awaiting onActivityResult"
        );

        Err(AbetError::Bridge(
            "Scanner intent dispatched (request code 0x41420002). \
             The decoded payload arrives via onActivityResult extra SCAN_RESULT — \
             wire the Activity callback to AbetResultReceiver."
                .into(),
        ))
    }
}

// ---------------------------------------------------------------------------
// NativePhotoPicker — Intent ACTION_PICK on external images
// ---------------------------------------------------------------------------

impl NativePhotoPicker for AndroidBridge {
    /// Launch the gallery via `ACTION_PICK` on the external images URI.
    ///
    /// The chosen `content://` URI arrives via `onActivityResult` with
    /// request code [`REQUEST_PICK_PHOTO`]; the host Activity reads the
    /// bytes through `ContentResolver` and forwards them.
    fn pick_photo(&self) -> Result<Option<Vec<u8>>> {
        let mut env = jni_env()?;
        let activity = activity()?;

        tracing::info!("Android: launching ACTION_PICK for images");

        let intent = new_intent(&mut env, "android.intent.action.PICK")?;

        let j_type: JString = env
            .new_string("image/*")
            .map_err(|e| jni_err("new_string(image/*)", e))?;
        env.call_method(
            &intent,
            "setType",
            "(Ljava/lang/String;)Landroid/content/Intent;",
            &[JValue::Object(&j_type)],
        )
        .map_err(|e| jni_err("setType(image/*)", e))?;

        start_for_result(&mut env, &activity, &intent, REQUEST_PICK_PHOTO)?;

        tracing::info!(
            request_code = REQUEST_PICK_PHOTO,
            "Android: pick intent dispatched — awaiting onActivityResult"
        );

        Err(AbetError::Bridge(
            "Gallery intent dispatched (request code 0x41420003). \
             The selected image arrives via onActivityResult — \
             wire the Activity callback to AbetResultReceiver."
                .into(),
        ))
    }
}

// ---------------------------------------------------------------------------
// NativeLocation — LocationManager.getLastKnownLocation
// ---------------------------------------------------------------------------

impl NativeLocation for AndroidBridge {
    /// Read the last known position from `LocationManager`.
    ///
    /// Synchronous by design: `getLastKnownLocation` returns the most recent
    /// cached fix without waking the GPS radio, which is accurate enough for
    /// tagging a complaint filed at the spot. `high_accuracy` prefers the
    /// GPS provider and falls back to the network provider when GPS has no
    /// fix yet (and vice versa).
    ///
    /// Requires `ACCESS_FINE_LOCATION` to have been granted; a `null`
    /// LocationManager result surfaces as `AbetError::Bridge`.
    fn current_position(&self, high_accuracy: bool) -> Result<GeoPoint> {
        let mut env = jni_env()?;
        let activity = activity()?;

        tracing::info!(high_accuracy, "Android: reading last known location");

        // -- LocationManager via getSystemService("location") -------------------
        let j_service: JString = env
            .new_string("location")
            .map_err(|e| jni_err("new_string(location)", e))?;

        let manager: JObject = env
            .call_method(
                &activity,
                "getSystemService",
                "(Ljava/lang/String;)Ljava/lang/Object;",
                &[JValue::Object(&j_service)],
            )
            .map_err(|e| jni_err("getSystemService(location)", e))?
            .l()
            .map_err(|e| jni_err("getSystemService->l", e))?;

        if manager.is_null() {
            return Err(AbetError::Bridge("LocationManager unavailable".into()));
        }

        // -- Try providers in preference order ----------------------------------
        let providers: [&str; 2] = if high_accuracy {
            ["gps", "network"]
        } else {
            ["network", "gps"]
        };

        for provider in providers {
            let j_provider: JString = env
                .new_string(provider)
                .map_err(|e| jni_err("new_string(provider)", e))?;

            let location: JObject = env
                .call_method(
                    &manager,
                    "getLastKnownLocation",
                    "(Ljava/lang/String;)Landroid/location/Location;",
                    &[JValue::Object(&j_provider)],
                )
                .map_err(|e| jni_err("getLastKnownLocation", e))?
                .l()
                .map_err(|e| jni_err("getLastKnownLocation->l", e))?;

            if location.is_null() {
                tracing::debug!(provider, "Android: provider has no cached fix");
                continue;
            }

            let lat = env
                .call_method(&location, "getLatitude", "()D", &[])
                .map_err(|e| jni_err("getLatitude", e))?
                .d()
                .map_err(|e| jni_err("getLatitude->d", e))?;
            let lng = env
                .call_method(&location, "getLongitude", "()D", &[])
                .map_err(|e| jni_err("getLongitude", e))?
                .d()
                .map_err(|e| jni_err("getLongitude->d", e))?;

            let has_accuracy = env
                .call_method(&location, "hasAccuracy", "()Z", &[])
                .map_err(|e| jni_err("hasAccuracy", e))?
                .z()
                .map_err(|e| jni_err("hasAccuracy->z", e))?;
            let accuracy = if has_accuracy {
                let acc = env
                    .call_method(&location, "getAccuracy", "()F", &[])
                    .map_err(|e| jni_err("getAccuracy", e))?
                    .f()
                    .map_err(|e| jni_err("getAccuracy->f", e))?;
                Some(f64::from(acc))
            } else {
                None
            };

            tracing::info!(provider, lat, lng, "Android: position read");
            return Ok(GeoPoint { lat, lng, accuracy });
        }

        Err(AbetError::Bridge(
            "no cached location fix — check that location permission is granted \
             and location services are enabled"
                .into(),
        ))
    }
}

// ---------------------------------------------------------------------------
// NativeKeychain — SharedPreferences (MODE_PRIVATE)
// ---------------------------------------------------------------------------

/// Get the app-private SharedPreferences instance.
fn shared_preferences<'a>(env: &mut JNIEnv<'a>, activity: &JObject<'_>) -> Result<JObject<'a>> {
    let j_file: JString = env
        .new_string(PREFS_FILE)
        .map_err(|e| jni_err("new_string(prefs file)", e))?;
    env.call_method(
        activity,
        "getSharedPreferences",
        "(Ljava/lang/String;I)Landroid/content/SharedPreferences;",
        &[JValue::Object(&j_file), JValue::Int(0)], // MODE_PRIVATE
    )
    .map_err(|e| jni_err("getSharedPreferences", e))?
    .l()
    .map_err(|e| jni_err("getSharedPreferences->l", e))
}

impl NativeKeychain for AndroidBridge {
    /// Store a secret in Android SharedPreferences.
    ///
    /// The value is Base64-encoded before storage. The key is prefixed with
    /// [`PREFS_KEY_PREFIX`] to avoid collisions with other preference users.
    ///
    /// For production apps requiring hardware-backed security, swap this for
    /// `EncryptedSharedPreferences` from AndroidX Security — the JNI call
    /// pattern is identical, only the class name and factory method change.
    fn store_secret(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut env = jni_env()?;
        let activity = activity()?;
        let alias = format!("{PREFS_KEY_PREFIX}{key}");

        tracing::info!(alias = %alias, "Android: storing secret in SharedPreferences");

        // -- Base64.encodeToString(value, Base64.NO_WRAP) -----------------------
        let j_bytes = env
            .byte_array_from_slice(value)
            .map_err(|e| jni_err("byte_array_from_slice(value)", e))?;

        let encoded: JObject = env
            .call_static_method(
                "android/util/Base64",
                "encodeToString",
                "([BI)Ljava/lang/String;",
                &[JValue::Object(&j_bytes), JValue::Int(2)], // Base64.NO_WRAP
            )
            .map_err(|e| jni_err("Base64.encodeToString", e))?
            .l()
            .map_err(|e| jni_err("encodeToString->l", e))?;

        let prefs = shared_preferences(&mut env, &activity)?;

        let editor: JObject = env
            .call_method(
                &prefs,
                "edit",
                "()Landroid/content/SharedPreferences$Editor;",
                &[],
            )
            .map_err(|e| jni_err("SharedPreferences.edit", e))?
            .l()
            .map_err(|e| jni_err("edit->l", e))?;

        let j_alias: JString = env
            .new_string(&alias)
            .map_err(|e| jni_err("new_string(alias)", e))?;

        env.call_method(
            &editor,
            "putString",
            "(Ljava/lang/String;Ljava/lang/String;)Landroid/content/SharedPreferences$Editor;",
            &[JValue::Object(&j_alias), JValue::Object(&encoded)],
        )
        .map_err(|e| jni_err("editor.putString", e))?;

        // apply() writes asynchronously; commit() would block the UI thread.
        env.call_method(&editor, "apply", "()V", &[])
            .map_err(|e| jni_err("editor.apply", e))?;

        tracing::info!(alias = %alias, "Android: secret stored");
        Ok(())
    }

    /// Load a secret from Android SharedPreferences.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    fn load_secret(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut env = jni_env()?;
        let activity = activity()?;
        let alias = format!("{PREFS_KEY_PREFIX}{key}");

        let prefs = shared_preferences(&mut env, &activity)?;

        let j_alias: JString = env
            .new_string(&alias)
            .map_err(|e| jni_err("new_string(alias)", e))?;

        let encoded: JObject = env
            .call_method(
                &prefs,
                "getString",
                "(Ljava/lang/String;Ljava/lang/String;)Ljava/lang/String;",
                &[JValue::Object(&j_alias), JValue::Object(&JObject::null())],
            )
            .map_err(|e| jni_err("getString", e))?
            .l()
            .map_err(|e| jni_err("getString->l", e))?;

        if encoded.is_null() {
            tracing::debug!(alias = %alias, "Android: secret not found");
            return Ok(None);
        }

        let decoded: JObject = env
            .call_static_method(
                "android/util/Base64",
                "decode",
                "(Ljava/lang/String;I)[B",
                &[JValue::Object(&encoded), JValue::Int(2)], // Base64.NO_WRAP
            )
            .map_err(|e| jni_err("Base64.decode", e))?
            .l()
            .map_err(|e| jni_err("decode->l", e))?;

        let bytes = env
            .convert_byte_array(decoded.into_raw())
            .map_err(|e| jni_err("convert_byte_array(decoded)", e))?;

        tracing::debug!(alias = %alias, bytes = bytes.len(), "Android: secret loaded");
        Ok(Some(bytes))
    }

    /// Delete a secret from Android SharedPreferences.
    ///
    /// Silently succeeds if the key does not exist.
    fn delete_secret(&self, key: &str) -> Result<()> {
        let mut env = jni_env()?;
        let activity = activity()?;
        let alias = format!("{PREFS_KEY_PREFIX}{key}");

        let prefs = shared_preferences(&mut env, &activity)?;

        let editor: JObject = env
            .call_method(
                &prefs,
                "edit",
                "()Landroid/content/SharedPreferences$Editor;",
                &[],
            )
            .map_err(|e| jni_err("SharedPreferences.edit", e))?
            .l()
            .map_err(|e| jni_err("edit->l", e))?;

        let j_alias: JString = env
            .new_string(&alias)
            .map_err(|e| jni_err("new_string(alias)", e))?;

        env.call_method(
            &editor,
            "remove",
            "(Ljava/lang/String;)Landroid/content/SharedPreferences$Editor;",
            &[JValue::Object(&j_alias)],
        )
        .map_err(|e| jni_err("editor.remove", e))?;

        env.call_method(&editor, "apply", "()V", &[])
            .map_err(|e| jni_err("editor.apply", e))?;

        tracing::info!(alias = %alias, "Android: secret deleted");
        Ok(())
    }
}
