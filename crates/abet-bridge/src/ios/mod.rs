// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// iOS platform bridge via objc2.
//
// Requires compilation with the iOS SDK (Xcode). Each trait method wraps the
// corresponding UIKit / Security.framework API through Objective-C message sends.
//
// This module is cfg-gated to `target_os = "ios"` and will not compile on other
// platforms.  All UIKit interactions require the main thread; methods that
// present view controllers will return `AbetError::Bridge` if called off-main.

#![cfg(target_os = "ios")]

use std::cell::RefCell;
use std::ffi::c_void;
use std::sync::mpsc;

use objc2::rc::Retained;
use objc2::runtime::{AnyObject, Bool, NSObject};
use objc2::{MainThreadMarker, define_class, msg_send};
use objc2_foundation::{NSData, NSDictionary, NSString};
use objc2_ui_kit::{
    UIApplication, UIImagePickerController, UIImagePickerControllerDelegate,
    UIImagePickerControllerSourceType, UINavigationControllerDelegate, UIViewController,
};

use abet_core::error::{AbetError, Result};
use abet_core::types::GeoPoint;

use crate::traits::*;

// ---------------------------------------------------------------------------
// Security.framework FFI (keychain)
// ---------------------------------------------------------------------------
// Security.framework is a C API not wrapped by objc2.  NSDictionary and
// CFDictionary are toll-free bridged, so we cast freely between them.

/// OSStatus success.
const ERR_SEC_SUCCESS: i32 = 0;
/// The item was not found in the keychain.
const ERR_SEC_ITEM_NOT_FOUND: i32 = -25300;
/// A duplicate item already exists.
const ERR_SEC_DUPLICATE_ITEM: i32 = -25299;

extern "C" {
    fn SecItemAdd(attributes: *const c_void, result: *mut *const c_void) -> i32;
    fn SecItemCopyMatching(query: *const c_void, result: *mut *const c_void) -> i32;
    fn SecItemUpdate(query: *const c_void, attrs_to_update: *const c_void) -> i32;
    fn SecItemDelete(query: *const c_void) -> i32;
}

// Security.framework constant strings.  These are `CFStringRef` globals,
// toll-free bridged with `NSString *`.  They are linked automatically when
// building against the iOS SDK.
extern "C" {
    static kSecClass: &'static NSString;
    static kSecClassGenericPassword: &'static NSString;
    static kSecAttrAccount: &'static NSString;
    static kSecAttrService: &'static NSString;
    static kSecValueData: &'static NSString;
    static kSecReturnData: &'static NSString;
    static kSecMatchLimit: &'static NSString;
    static kSecMatchLimitOne: &'static NSString;
}

/// The keychain service identifier for all Abet secrets.
const KEYCHAIN_SERVICE: &str = "org.hyperpolymath.abet";

// ---------------------------------------------------------------------------
// UIKit C functions & constants
// ---------------------------------------------------------------------------

extern "C" {
    /// Key into the `info` dictionary passed to the image-picker delegate.
    /// The value is the original `UIImage` chosen by the user.
    static UIImagePickerControllerOriginalImage: &'static NSString;

    /// Convert a `UIImage` to JPEG `NSData`.
    ///
    /// ```c
    /// NSData * _Nullable UIImageJPEGRepresentation(UIImage *image,
    ///                                              CGFloat compressionQuality);
    /// ```
    fn UIImageJPEGRepresentation(
        image: *const AnyObject,
        compression_quality: f64,
    ) -> *mut AnyObject;
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Obtain the root `UIViewController` from the key window.
///
/// Uses the deprecated `keyWindow` property for broad iOS-version compat.
/// On iOS 15+ the caller should ideally walk `connectedScenes`, but for a
/// single-window app this is sufficient.
fn root_view_controller() -> Result<Retained<UIViewController>> {
    let mtm = MainThreadMarker::new()
        .ok_or_else(|| AbetError::Bridge("must be called from the main thread".into()))?;

    let app = UIApplication::sharedApplication(mtm);

    // SAFETY: msg_send! to well-known UIApplication selectors (keyWindow,
    // rootViewController). MainThreadMarker guarantees main-thread execution.
    let root: Option<Retained<UIViewController>> = unsafe {
        let window: Option<Retained<AnyObject>> = msg_send![&app, keyWindow];
        window.and_then(|w| msg_send![&w, rootViewController])
    };

    root.ok_or_else(|| AbetError::Bridge("no root view controller available".into()))
}

/// Assert that we are on the main thread and return the marker.
fn require_main_thread() -> Result<MainThreadMarker> {
    MainThreadMarker::new()
        .ok_or_else(|| AbetError::Bridge("must be called from the main thread".into()))
}

/// Cast `NSDictionary` to a `*const c_void` for Security.framework calls.
///
/// NSDictionary and CFDictionary are toll-free bridged so this cast is valid.
fn dict_as_cf(dict: &NSDictionary<NSString, AnyObject>) -> *const c_void {
    dict as *const NSDictionary<NSString, AnyObject> as *const c_void
}

/// Cast a `*const NSString` to `*const AnyObject` (NSString *is* an
/// AnyObject).
///
/// SAFETY: NSString is a subclass of NSObject (which is AnyObject in objc2).
/// The pointer representation is identical — no layout change.
unsafe fn nsstr_as_obj(s: &NSString) -> &AnyObject {
    &*(s as *const NSString as *const AnyObject)
}

/// Cast an `NSData` reference to `&AnyObject`.
///
/// SAFETY: NSData is a subclass of NSObject. Same pointer, same layout.
unsafe fn nsdata_as_obj(d: &NSData) -> &AnyObject {
    &*(d as *const NSData as *const AnyObject)
}

// ---------------------------------------------------------------------------
// Image picker delegate (UIImagePickerControllerDelegate)
// ---------------------------------------------------------------------------
// Serves both the camera and the photo library; only the picker's source type
// differs.  Captures an `mpsc::Sender` so the presenting call can block until
// the user takes or chooses a photo, or cancels.

struct PickerDelegateIvars {
    /// Channel sender; taken (`Option::take`) on first callback to prevent
    /// double-sends.
    sender: RefCell<Option<mpsc::Sender<Option<Vec<u8>>>>>,
}

// SAFETY: define_class! #[unsafe(super(NSObject))] declares PickerDelegate as
// an ObjC class inheriting from NSObject. This is required by objc2 for all
// custom ObjC classes. MainThreadOnly ensures delegate callbacks only fire on
// the main thread.
define_class! {
    #[unsafe(super(NSObject))]
    #[thread_kind = MainThreadOnly]
    #[name = "AbetImagePickerDelegate"]
    #[ivars = PickerDelegateIvars]
    struct PickerDelegate;

    unsafe impl UIImagePickerControllerDelegate for PickerDelegate {
        /// Called when the user has taken or chosen an image.
        #[unsafe(method(imagePickerController:didFinishPickingMediaWithInfo:))]
        fn did_finish(
            &self,
            picker: &UIImagePickerController,
            info: &NSDictionary<NSString, AnyObject>,
        ) {
            // SAFETY: objectForKey with UIImagePickerControllerOriginalImage
            // (extern static from UIKit). Returns nil if key not present.
            let image_bytes: Option<Vec<u8>> = unsafe {
                info.objectForKey(UIImagePickerControllerOriginalImage)
            }
            .and_then(|ui_image: Retained<AnyObject>| {
                // SAFETY: UIImageJPEGRepresentation is a UIKit C function.
                // Returns autoreleased NSData* (nil on failure).  Encoded at
                // full quality here; abet-api re-encodes for upload.
                let raw = unsafe {
                    UIImageJPEGRepresentation(&*ui_image as *const AnyObject, 0.9)
                };
                if raw.is_null() {
                    None
                } else {
                    // SAFETY: non-null result is an NSData* (toll-free bridged
                    // with CFData). We copy bytes immediately so the
                    // autorelease is harmless.
                    let ns_data: &NSData = unsafe { &*(raw as *const NSData) };
                    Some(ns_data.to_vec())
                }
            });

            // SAFETY: dismissViewControllerAnimated:completion: is a standard
            // UIViewController selector. Called on main thread (delegate is
            // MainThreadOnly).
            unsafe {
                let _: () = msg_send![
                    picker,
                    dismissViewControllerAnimated: true,
                    completion: std::ptr::null::<c_void>()
                ];
            }

            if let Some(tx) = self.ivars().sender.borrow_mut().take() {
                let _ = tx.send(image_bytes);
            }
        }

        /// Called when the user cancels the picker.
        #[unsafe(method(imagePickerControllerDidCancel:))]
        fn did_cancel(&self, picker: &UIImagePickerController) {
            // SAFETY: dismissViewControllerAnimated:completion: — same as above.
            unsafe {
                let _: () = msg_send![
                    picker,
                    dismissViewControllerAnimated: true,
                    completion: std::ptr::null::<c_void>()
                ];
            }
            if let Some(tx) = self.ivars().sender.borrow_mut().take() {
                let _ = tx.send(None);
            }
        }
    }

    // UIImagePickerController requires its delegate to also conform to
    // UINavigationControllerDelegate.  We provide an empty impl.
    unsafe impl UINavigationControllerDelegate for PickerDelegate {}
}

impl PickerDelegate {
    /// Create a new picker delegate wired to `tx`.
    fn new(mtm: MainThreadMarker, tx: mpsc::Sender<Option<Vec<u8>>>) -> Retained<Self> {
        let this = mtm.alloc::<Self>();
        let this = this.set_ivars(PickerDelegateIvars {
            sender: RefCell::new(Some(tx)),
        });
        // SAFETY: Standard NSObject init via super. The alloc above provides
        // a valid, allocated-but-uninitialised object; init completes it.
        unsafe { msg_send![super(this), init] }
    }
}

/// Present an image picker for `source_type` and block until the delegate
/// delivers a result.
fn present_image_picker(
    source_type: UIImagePickerControllerSourceType,
) -> Result<Option<Vec<u8>>> {
    let mtm = require_main_thread()?;

    let available = UIImagePickerController::isSourceTypeAvailable(source_type, mtm);
    if !available {
        return Err(AbetError::Bridge(
            "image picker source type is not available on this device".into(),
        ));
    }

    let picker = UIImagePickerController::new(mtm);
    // SAFETY: setSourceType is a UIImagePickerController property setter.
    // We verified availability with isSourceTypeAvailable above.
    unsafe {
        picker.setSourceType(source_type);
    }

    // Channel for the delegate to deliver the result.
    let (tx, rx) = mpsc::channel();
    let delegate = PickerDelegate::new(mtm, tx);

    // SAFETY: PickerDelegate conforms to both UIImagePickerControllerDelegate
    // and UINavigationControllerDelegate (defined via define_class! above).
    // The pointer cast PickerDelegate→AnyObject is safe: PickerDelegate is an
    // NSObject subclass with identical pointer representation.
    unsafe {
        let delegate_obj: &AnyObject =
            &*((&*delegate) as *const PickerDelegate as *const AnyObject);
        picker.setDelegate(Some(delegate_obj));
    }

    // Present modally on the root view controller.
    let root_vc = root_view_controller()?;
    // SAFETY: presentViewController is a UIViewController method.
    // Main-thread requirement satisfied by require_main_thread() above.
    unsafe {
        root_vc.presentViewController_animated_completion(&picker, true, None);
    }

    // Block until the delegate fires.  The main run loop continues to pump
    // while the picker is presented, so the delegate callbacks will execute
    // on the main thread as expected.
    rx.recv()
        .map_err(|e| AbetError::Bridge(format!("image picker delegate channel error: {e}")))
}

// ---------------------------------------------------------------------------
// IosBridge
// ---------------------------------------------------------------------------

/// Concrete iOS platform bridge.
///
/// All methods that present UI controllers require invocation from the main
/// thread.  The keychain methods (`NativeKeychain`) are thread-safe and may
/// be called from any thread.
pub struct IosBridge;

impl IosBridge {
    /// Create a new iOS bridge instance.
    pub fn new() -> Self {
        Self
    }
}

impl PlatformBridge for IosBridge {
    fn platform_name(&self) -> &str {
        "iOS"
    }
}

// ---------------------------------------------------------------------------
// NativeCamera -- UIImagePickerController (camera source)
// ---------------------------------------------------------------------------

impl NativeCamera for IosBridge {
    /// Launch the device camera and return captured JPEG bytes.
    ///
    /// This method **must** be called from the main thread.  It blocks the
    /// current thread until the user either takes a photo (returns
    /// `Ok(Some(jpeg_bytes))`) or cancels (`Ok(None)`).
    ///
    /// # Errors
    ///
    /// Returns `AbetError::Bridge` when:
    /// - Called off the main thread.
    /// - The camera source type is unavailable (e.g. Simulator).
    /// - No root view controller is available for presentation.
    fn capture_photo(&self) -> Result<Option<Vec<u8>>> {
        tracing::info!("iOS: launching UIImagePickerController for camera");
        present_image_picker(UIImagePickerControllerSourceType::Camera)
    }
}

// ---------------------------------------------------------------------------
// NativePhotoPicker -- UIImagePickerController (photo library source)
// ---------------------------------------------------------------------------

impl NativePhotoPicker for IosBridge {
    /// Present the photo library and return the selected image as JPEG bytes.
    ///
    /// Same presentation and blocking semantics as
    /// [`NativeCamera::capture_photo`]; only the source type differs.
    fn pick_photo(&self) -> Result<Option<Vec<u8>>> {
        tracing::info!("iOS: launching UIImagePickerController for photo library");
        present_image_picker(UIImagePickerControllerSourceType::PhotoLibrary)
    }
}

// ---------------------------------------------------------------------------
// NativeBarcodeScanner -- requires AVFoundation session in the host app
// ---------------------------------------------------------------------------

impl NativeBarcodeScanner for IosBridge {
    /// QR scanning on iOS requires an `AVCaptureSession` with a metadata
    /// output delegate, which must be owned by a host view controller with a
    /// camera preview layer.  That controller lives in the Xcode project, not
    /// in this crate — see `IOS-INTEGRATION.md` for the Swift glue code that
    /// forwards decoded payloads back through `abet_scan_result`.
    fn scan_code(&self) -> Result<Option<String>> {
        tracing::warn!("iOS: scan_code requires the host AVCaptureSession controller");
        Err(AbetError::Bridge(
            "QR scanning requires the host app's AVCaptureSession view controller — \
             present AbetScannerViewController and forward the payload via abet_scan_result"
                .into(),
        ))
    }
}

// ---------------------------------------------------------------------------
// NativeLocation -- requires CLLocationManager delegate in the host app
// ---------------------------------------------------------------------------

impl NativeLocation for IosBridge {
    /// Location on iOS is delivered asynchronously through a
    /// `CLLocationManagerDelegate`, which must outlive the request and is
    /// therefore owned by the host app.  The host forwards fixes via
    /// `abet_location_result` — see `IOS-INTEGRATION.md`.
    fn current_position(&self, high_accuracy: bool) -> Result<GeoPoint> {
        tracing::warn!(
            high_accuracy,
            "iOS: current_position requires the host CLLocationManager delegate"
        );
        Err(AbetError::Bridge(
            "location requires the host app's CLLocationManager delegate — \
             request a fix and forward it via abet_location_result"
                .into(),
        ))
    }
}

// ---------------------------------------------------------------------------
// NativeKeychain -- Security.framework
// ---------------------------------------------------------------------------

impl NativeKeychain for IosBridge {
    /// Store `value` in the iOS Keychain under `key`.
    ///
    /// If an entry already exists for `key` it is updated in place via
    /// `SecItemUpdate`.
    ///
    /// This method is thread-safe and does not require the main thread.
    fn store_secret(&self, key: &str, value: &[u8]) -> Result<()> {
        tracing::info!(key, "iOS: storing secret in Keychain");

        let ns_key = NSString::from_str(key);
        let ns_service = NSString::from_str(KEYCHAIN_SERVICE);
        let ns_data = NSData::with_bytes(value);

        // SAFETY: Accessing extern statics from Security.framework. These are
        // constant CFStringRef values linked by the iOS SDK, valid for process lifetime.
        let keys: Vec<&NSString> =
            unsafe { vec![kSecClass, kSecAttrAccount, kSecAttrService, kSecValueData] };
        // SAFETY: nsstr_as_obj/nsdata_as_obj are toll-free bridge casts.
        let values: Vec<&AnyObject> = unsafe {
            vec![
                nsstr_as_obj(kSecClassGenericPassword),
                nsstr_as_obj(&ns_key),
                nsstr_as_obj(&ns_service),
                nsdata_as_obj(&ns_data),
            ]
        };

        let dict = NSDictionary::from_slices(&keys, &values);

        // SAFETY: dict_as_cf casts NSDictionary to CFDictionary (toll-free bridged).
        // SecItemAdd is a C function from Security.framework with well-defined semantics.
        let status = unsafe { SecItemAdd(dict_as_cf(&dict), std::ptr::null_mut()) };

        match status {
            ERR_SEC_SUCCESS => Ok(()),
            ERR_SEC_DUPLICATE_ITEM => {
                // Item exists -- update it instead.
                self.update_secret(key, value)
            }
            code => Err(AbetError::Bridge(format!(
                "SecItemAdd failed with OSStatus {code}"
            ))),
        }
    }

    /// Retrieve a secret from the iOS Keychain by `key`.
    ///
    /// Returns `Ok(None)` if no entry exists for the given key.
    ///
    /// This method is thread-safe.
    fn load_secret(&self, key: &str) -> Result<Option<Vec<u8>>> {
        tracing::debug!(key, "iOS: loading secret from Keychain");

        let ns_key = NSString::from_str(key);
        let ns_service = NSString::from_str(KEYCHAIN_SERVICE);

        // kSecReturnData expects a CFBoolean.  kCFBooleanTrue is toll-free
        // bridged with `[NSNumber numberWithBool:YES]`.
        // SAFETY: msg_send to NSNumber class method. Returns a valid retained object.
        let cf_true: Retained<AnyObject> =
            unsafe { msg_send![objc2::class!(NSNumber), numberWithBool: Bool::YES] };

        // SAFETY: Accessing Security.framework extern statics (process-lifetime constants).
        let keys: Vec<&NSString> = unsafe {
            vec![
                kSecClass,
                kSecAttrAccount,
                kSecAttrService,
                kSecReturnData,
                kSecMatchLimit,
            ]
        };
        // SAFETY: Toll-free bridge casts.
        let values: Vec<&AnyObject> = unsafe {
            vec![
                nsstr_as_obj(kSecClassGenericPassword),
                nsstr_as_obj(&ns_key),
                nsstr_as_obj(&ns_service),
                &*cf_true,
                nsstr_as_obj(kSecMatchLimitOne),
            ]
        };

        let dict = NSDictionary::from_slices(&keys, &values);

        let mut result: *const c_void = std::ptr::null();
        // SAFETY: SecItemCopyMatching is a Security.framework C function.
        // On success, `result` receives a retained CFData (toll-free bridged with NSData).
        let status = unsafe { SecItemCopyMatching(dict_as_cf(&dict), &mut result) };

        match status {
            ERR_SEC_SUCCESS => {
                if result.is_null() {
                    return Ok(None);
                }
                // SAFETY: `result` is a retained CFData. CFData and NSData are
                // toll-free bridged — identical layout.
                let ns_data: &NSData = unsafe { &*(result as *const NSData) };
                let bytes = ns_data.to_vec();

                // SAFETY: Balance the implicit +1 retain from SecItemCopyMatching.
                // We own this reference and must release it.
                unsafe {
                    let _: () = msg_send![result as *const AnyObject, release];
                }

                Ok(Some(bytes))
            }
            ERR_SEC_ITEM_NOT_FOUND => Ok(None),
            code => Err(AbetError::Bridge(format!(
                "SecItemCopyMatching failed with OSStatus {code}"
            ))),
        }
    }

    /// Delete a secret from the iOS Keychain.
    ///
    /// Silently succeeds if no entry exists for `key`.
    ///
    /// This method is thread-safe.
    fn delete_secret(&self, key: &str) -> Result<()> {
        tracing::info!(key, "iOS: deleting secret from Keychain");

        let ns_key = NSString::from_str(key);
        let ns_service = NSString::from_str(KEYCHAIN_SERVICE);

        // SAFETY: Security.framework extern statics (process-lifetime constants).
        let keys: Vec<&NSString> = unsafe { vec![kSecClass, kSecAttrAccount, kSecAttrService] };
        // SAFETY: Toll-free bridge casts.
        let values: Vec<&AnyObject> = unsafe {
            vec![
                nsstr_as_obj(kSecClassGenericPassword),
                nsstr_as_obj(&ns_key),
                nsstr_as_obj(&ns_service),
            ]
        };

        let dict = NSDictionary::from_slices(&keys, &values);
        // SAFETY: SecItemDelete C FFI with toll-free bridged dict.
        let status = unsafe { SecItemDelete(dict_as_cf(&dict)) };

        match status {
            ERR_SEC_SUCCESS | ERR_SEC_ITEM_NOT_FOUND => Ok(()),
            code => Err(AbetError::Bridge(format!(
                "SecItemDelete failed with OSStatus {code}"
            ))),
        }
    }
}

/// Private keychain helpers.
impl IosBridge {
    /// Update an existing keychain entry with new value bytes.
    fn update_secret(&self, key: &str, value: &[u8]) -> Result<()> {
        let ns_key = NSString::from_str(key);
        let ns_service = NSString::from_str(KEYCHAIN_SERVICE);
        let ns_data = NSData::with_bytes(value);

        // SAFETY: Security.framework extern statics (process-lifetime constants).
        let query_keys: Vec<&NSString> =
            unsafe { vec![kSecClass, kSecAttrAccount, kSecAttrService] };
        // SAFETY: Toll-free bridge casts.
        let query_values: Vec<&AnyObject> = unsafe {
            vec![
                nsstr_as_obj(kSecClassGenericPassword),
                nsstr_as_obj(&ns_key),
                nsstr_as_obj(&ns_service),
            ]
        };
        let query = NSDictionary::from_slices(&query_keys, &query_values);

        // SAFETY: Security.framework extern static (process-lifetime constant).
        let update_keys: Vec<&NSString> = unsafe { vec![kSecValueData] };
        // SAFETY: nsdata_as_obj is a toll-free bridge cast.
        let update_values: Vec<&AnyObject> = unsafe { vec![nsdata_as_obj(&ns_data)] };
        let update = NSDictionary::from_slices(&update_keys, &update_values);

        // SAFETY: SecItemUpdate is a Security.framework C function.
        let status = unsafe { SecItemUpdate(dict_as_cf(&query), dict_as_cf(&update)) };

        if status == ERR_SEC_SUCCESS {
            Ok(())
        } else {
            Err(AbetError::Bridge(format!(
                "SecItemUpdate failed with OSStatus {status}"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Verify that the bridge reports the correct platform name.
    #[test]
    fn platform_name() {
        let bridge = IosBridge::new();
        assert_eq!(bridge.platform_name(), "iOS");
    }

    // Integration tests for UI-presenting methods require a running iOS app
    // with a key window.  They are exercised in the Xcode test target rather
    // than via `cargo test`.
}
