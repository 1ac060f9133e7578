//! Owner and group name resolution via the host account database.
//!
//! Small safe wrappers over `getpwuid_r`/`getgrgid_r`. Buffers start at a
//! reasonable size and grow on `ERANGE`; a missing entry is `None`, which
//! the caller turns into a lookup error.

use std::ffi::CStr;

/// Growth cap for the lookup buffer.
const MAX_BUF_LEN: usize = 1 << 20;

/// Resolve a numeric user id to its account name.
#[allow(unsafe_code)]
pub fn user_name(uid: u32) -> Option<String> {
    let mut pwd: libc::passwd = unsafe { std::mem::zeroed() };
    let mut result: *mut libc::passwd = std::ptr::null_mut();
    let mut buf = vec![0u8; 1024];
    loop {
        let rc = unsafe {
            libc::getpwuid_r(
                uid,
                &raw mut pwd,
                buf.as_mut_ptr().cast(),
                buf.len(),
                &raw mut result,
            )
        };
        if rc == libc::ERANGE && buf.len() < MAX_BUF_LEN {
            buf.resize(buf.len() * 2, 0);
            continue;
        }
        if rc != 0 || result.is_null() {
            return None;
        }
        let name = unsafe { CStr::from_ptr(pwd.pw_name) };
        return Some(name.to_string_lossy().into_owned());
    }
}

/// Resolve a numeric group id to its group name.
#[allow(unsafe_code)]
pub fn group_name(gid: u32) -> Option<String> {
    let mut grp: libc::group = unsafe { std::mem::zeroed() };
    let mut result: *mut libc::group = std::ptr::null_mut();
    let mut buf = vec![0u8; 1024];
    loop {
        let rc = unsafe {
            libc::getgrgid_r(
                gid,
                &raw mut grp,
                buf.as_mut_ptr().cast(),
                buf.len(),
                &raw mut result,
            )
        };
        if rc == libc::ERANGE && buf.len() < MAX_BUF_LEN {
            buf.resize(buf.len() * 2, 0);
            continue;
        }
        if rc != 0 || result.is_null() {
            return None;
        }
        let name = unsafe { CStr::from_ptr(grp.gr_name) };
        return Some(name.to_string_lossy().into_owned());
    }
}

/// Split a raw device id into its (major, minor) numbers.
#[allow(clippy::unnecessary_cast)] // dev_t width varies by platform
pub fn device_numbers(dev: u64) -> (u64, u64) {
    let dev = dev as libc::dev_t;
    (libc::major(dev) as u64, libc::minor(dev) as u64)
}
