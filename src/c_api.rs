//! C ABI for hosts that drive the scene from outside Rust.
//!
//! Every function accepts a null handle and then does nothing (or returns a
//! zero/false/-1 result). Output pointers may also be null.

use std::ffi::{CStr, c_char};

use crate::{config::SimConfig, scene::Scene, vector::Vector2};

unsafe fn write_pair(out_x: *mut f64, out_y: *mut f64, v: Vector2) {
    unsafe {
        if let Some(x) = out_x.as_mut() {
            *x = v.x;
        }
        if let Some(y) = out_y.as_mut() {
            *y = v.y;
        }
    }
}

fn index_result(index: Option<usize>) -> i64 {
    index.map_or(-1, |i| i as i64)
}

fn into_handle(scene: crate::Result<Scene>) -> *mut Scene {
    match scene {
        Ok(scene) => Box::into_raw(Box::new(scene)),
        Err(e) => {
            log::error!("failed to create scene: {}", e);
            std::ptr::null_mut()
        }
    }
}

/// Creates a scene with the default configuration. Returns null on invalid canvas sizes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Orrery_Create(width: f64, height: f64, seed: u64) -> *mut Scene {
    into_handle(Scene::new(SimConfig::default(), width, height, seed))
}

/// Creates a scene from a NUL-terminated JSON configuration. Returns null on any error.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Orrery_CreateWithConfig(
    config_json: *const c_char,
    width: f64,
    height: f64,
    seed: u64,
) -> *mut Scene {
    if config_json.is_null() {
        return std::ptr::null_mut();
    }
    let json = unsafe { CStr::from_ptr(config_json) };
    let Ok(json) = json.to_str() else {
        log::error!("configuration is not valid UTF-8");
        return std::ptr::null_mut();
    };
    into_handle(SimConfig::from_json(json).and_then(|config| Scene::new(config, width, height, seed)))
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Orrery_Destroy(handle: *mut Scene) {
    if !handle.is_null() {
        unsafe { drop(Box::from_raw(handle)) };
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Orrery_Tick(handle: *mut Scene) {
    if let Some(scene) = unsafe { handle.as_mut() } {
        scene.tick();
    }
}

/// Reseeds for a new canvas size. Returns false (and keeps the old scene) on error.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Orrery_Resize(handle: *mut Scene, width: f64, height: f64) -> bool {
    let Some(scene) = (unsafe { handle.as_mut() }) else {
        return false;
    };
    match scene.resize(width, height) {
        Ok(()) => true,
        Err(e) => {
            log::error!("resize rejected: {}", e);
            false
        }
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Orrery_BodyCount(handle: *const Scene) -> usize {
    unsafe { handle.as_ref() }.map_or(0, |scene| scene.simulation().len())
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Orrery_BodyPosition(
    handle: *const Scene,
    index: usize,
    out_x: *mut f64,
    out_y: *mut f64,
) -> bool {
    let body = unsafe { handle.as_ref() }.and_then(|scene| scene.simulation().body(index));
    match body {
        Some(body) => {
            unsafe { write_pair(out_x, out_y, body.pos) };
            true
        }
        None => false,
    }
}

/// Current display radius, or 0 for an unknown body.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Orrery_BodyRadius(handle: *const Scene, index: usize) -> f64 {
    unsafe { handle.as_ref() }
        .and_then(|scene| scene.simulation().body(index))
        .map_or(0.0, |body| body.display_radius)
}

/// Copies the body's name into `buf` as a NUL-terminated string, truncating to
/// `len - 1` bytes. Returns the full name length in bytes (without the NUL).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Orrery_BodyName(
    handle: *const Scene,
    index: usize,
    buf: *mut c_char,
    len: usize,
) -> usize {
    let Some(body) = unsafe { handle.as_ref() }.and_then(|scene| scene.simulation().body(index)) else {
        return 0;
    };
    let name = body.name.as_bytes();
    if !buf.is_null() && len > 0 {
        let n = name.len().min(len - 1);
        unsafe {
            std::ptr::copy_nonoverlapping(name.as_ptr().cast::<c_char>(), buf, n);
            *buf.add(n) = 0;
        }
    }
    name.len()
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Orrery_TrailLength(handle: *const Scene, index: usize) -> usize {
    unsafe { handle.as_ref() }
        .and_then(|scene| scene.simulation().body(index))
        .map_or(0, |body| body.trail.len())
}

/// Reads trail point `point` (0 is the oldest) of body `index`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Orrery_TrailPoint(
    handle: *const Scene,
    index: usize,
    point: usize,
    out_x: *mut f64,
    out_y: *mut f64,
) -> bool {
    let p = unsafe { handle.as_ref() }
        .and_then(|scene| scene.simulation().body(index))
        .and_then(|body| body.trail.get(point));
    match p {
        Some(p) => {
            unsafe { write_pair(out_x, out_y, p) };
            true
        }
        None => false,
    }
}

/// Selects the body at (x, y). Returns its index, or -1 if nothing was selected
/// (empty space, or the click closed the active selection).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Orrery_Click(handle: *mut Scene, x: f64, y: f64) -> i64 {
    let Some(scene) = (unsafe { handle.as_mut() }) else {
        return -1;
    };
    match scene.click(x, y) {
        Some(_) => index_result(scene.interaction().active()),
        None => -1,
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Orrery_CloseSelection(handle: *mut Scene) {
    if let Some(scene) = unsafe { handle.as_mut() } {
        scene.close_selection();
    }
}

/// Returns true if any body's radius changed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Orrery_Hover(handle: *mut Scene, x: f64, y: f64) -> bool {
    unsafe { handle.as_mut() }.is_some_and(|scene| scene.hover(x, y))
}

/// Grabs the body at (x, y). Returns its index, or -1 if nothing was hit.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Orrery_DragStart(handle: *mut Scene, x: f64, y: f64) -> i64 {
    index_result(unsafe { handle.as_mut() }.and_then(|scene| scene.drag_start(x, y)))
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Orrery_DragMove(handle: *mut Scene, x: f64, y: f64) {
    if let Some(scene) = unsafe { handle.as_mut() } {
        scene.drag_move(x, y);
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Orrery_DragEnd(handle: *mut Scene) {
    if let Some(scene) = unsafe { handle.as_mut() } {
        scene.drag_end();
    }
}

/// Returns true if the central body is now drawn to scale.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Orrery_ToggleSunScale(handle: *mut Scene) -> bool {
    unsafe { handle.as_mut() }.is_some_and(|scene| scene.toggle_sun_scale())
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Orrery_StarCount(handle: *const Scene) -> usize {
    unsafe { handle.as_ref() }.map_or(0, |scene| scene.ephemera().stars.len())
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Orrery_Star(
    handle: *const Scene,
    index: usize,
    out_x: *mut f64,
    out_y: *mut f64,
    out_size: *mut f64,
    out_brightness: *mut f64,
) -> bool {
    let Some(star) = unsafe { handle.as_ref() }.and_then(|scene| scene.ephemera().stars.get(index)) else {
        return false;
    };
    unsafe {
        write_pair(out_x, out_y, star.pos);
        write_pair(out_size, out_brightness, Vector2::new(star.size, star.brightness));
    }
    true
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Orrery_CometCount(handle: *const Scene) -> usize {
    unsafe { handle.as_ref() }.map_or(0, |scene| scene.ephemera().comets.len())
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Orrery_Comet(
    handle: *const Scene,
    index: usize,
    out_x: *mut f64,
    out_y: *mut f64,
) -> bool {
    let Some(comet) = unsafe { handle.as_ref() }.and_then(|scene| scene.ephemera().comets.get(index)) else {
        return false;
    };
    unsafe { write_pair(out_x, out_y, comet.pos) };
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    #[test]
    fn null_handles_are_harmless() {
        unsafe {
            Orrery_Tick(std::ptr::null_mut());
            Orrery_Destroy(std::ptr::null_mut());
            assert_eq!(Orrery_BodyCount(std::ptr::null()), 0);
            assert_eq!(Orrery_Click(std::ptr::null_mut(), 0.0, 0.0), -1);
            assert!(!Orrery_Resize(std::ptr::null_mut(), 10.0, 10.0));
            assert!(!Orrery_BodyPosition(std::ptr::null(), 0, std::ptr::null_mut(), std::ptr::null_mut()));
        }
    }

    #[test]
    fn create_tick_and_query() {
        unsafe {
            let handle = Orrery_Create(800.0, 600.0, 3);
            assert!(!handle.is_null());
            assert_eq!(Orrery_BodyCount(handle), 10);

            Orrery_Tick(handle);
            assert_eq!(Orrery_TrailLength(handle, 3), 1);
            assert_eq!(Orrery_TrailLength(handle, 0), 0);

            let (mut x, mut y) = (0.0, 0.0);
            assert!(Orrery_BodyPosition(handle, 0, &mut x, &mut y));
            assert_eq!((x, y), (400.0, 300.0));
            assert!(!Orrery_BodyPosition(handle, 99, &mut x, &mut y));

            let mut buf = [0 as c_char; 4];
            let len = Orrery_BodyName(handle, 3, buf.as_mut_ptr(), buf.len());
            assert_eq!(len, "Earth".len());
            assert_eq!(CStr::from_ptr(buf.as_ptr()).to_str().unwrap(), "Ear");

            assert_eq!(Orrery_Click(handle, 400.0, 300.0), 0);
            assert_eq!(Orrery_DragStart(handle, 400.0, 300.0), 0);
            Orrery_DragMove(handle, 100.0, 100.0);
            Orrery_DragEnd(handle);
            assert!(Orrery_BodyPosition(handle, 0, &mut x, &mut y));
            assert_eq!((x, y), (100.0, 100.0));

            assert_eq!(Orrery_StarCount(handle), 8000);
            assert_eq!(Orrery_CometCount(handle), 3);
            assert!(Orrery_Comet(handle, 0, &mut x, &mut y));

            Orrery_Destroy(handle);
        }
    }

    #[test]
    fn create_with_config_reports_errors_as_null() {
        unsafe {
            let good = CString::new(r#"{ "star_count": 5, "comet_count": 1 }"#).unwrap();
            let handle = Orrery_CreateWithConfig(good.as_ptr(), 800.0, 600.0, 1);
            assert!(!handle.is_null());
            assert_eq!(Orrery_StarCount(handle), 5);
            Orrery_Destroy(handle);

            let bad = CString::new(r#"{ "trail_cap": 0 }"#).unwrap();
            assert!(Orrery_CreateWithConfig(bad.as_ptr(), 800.0, 600.0, 1).is_null());
            assert!(Orrery_Create(0.0, 600.0, 1).is_null());
        }
    }
}
