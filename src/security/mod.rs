// Security: privilege detection and rename access checks

use std::fs;
use std::path::Path;

// Renaming needs write access to the containing directory, not to the file
pub fn can_rename_in(dir: &Path) -> bool {
    let Ok(metadata) = fs::metadata(dir) else {
        return false;
    };
    if !metadata.is_dir() {
        return false;
    }
    if metadata.permissions().readonly() && !is_running_as_admin() {
        return false;
    }
    can_write_to_directory(dir)
}

// Tests write access by creating temp file
fn can_write_to_directory(dir: &Path) -> bool {
    let test_file = dir.join(format!(".rename_probe_{}", std::process::id()));
    match fs::File::create(&test_file) {
        Ok(file) => {
            drop(file);
            let _ = fs::remove_file(&test_file);
            true
        }
        Err(_) => false,
    }
}

// Checks if running as admin (Windows)
#[cfg(target_os = "windows")]
fn is_running_as_admin() -> bool {
    use windows::Win32::Foundation::BOOL;
    use windows::Win32::Security::{
        AllocateAndInitializeSid, CheckTokenMembership, FreeSid, PSID, SID_IDENTIFIER_AUTHORITY,
    };

    const SECURITY_NT_AUTHORITY: SID_IDENTIFIER_AUTHORITY = SID_IDENTIFIER_AUTHORITY {
        Value: [0, 0, 0, 0, 0, 5],
    };
    const SECURITY_BUILTIN_DOMAIN_RID: u32 = 32;
    const DOMAIN_ALIAS_RID_ADMINS: u32 = 544;

    let mut admin_group: PSID = PSID::default();

    let alloc_result = unsafe {
        AllocateAndInitializeSid(
            &SECURITY_NT_AUTHORITY,
            2,
            SECURITY_BUILTIN_DOMAIN_RID,
            DOMAIN_ALIAS_RID_ADMINS,
            0,
            0,
            0,
            0,
            0,
            0,
            &mut admin_group,
        )
    };
    if alloc_result.is_err() {
        return false;
    }

    let mut is_member: BOOL = BOOL(0);
    let check_result = unsafe { CheckTokenMembership(None, admin_group, &mut is_member) };

    // SID must be freed on every path past allocation
    unsafe {
        let _ = FreeSid(admin_group);
    }

    check_result.is_ok() && is_member.as_bool()
}

// Checks if running as root (Unix)
#[cfg(target_family = "unix")]
fn is_running_as_admin() -> bool {
    // SAFETY: getuid() is always safe to call
    unsafe { libc::getuid() == 0 }
}

#[cfg(not(any(target_os = "windows", target_family = "unix")))]
fn is_running_as_admin() -> bool {
    false
}
