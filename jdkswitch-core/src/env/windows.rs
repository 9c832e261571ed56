//! System environment backed by
//! `HKLM\SYSTEM\CurrentControlSet\Control\Session Manager\Environment`.

use super::{EnvironmentAccessor, needs_expansion};
use crate::error::AccessError;
use std::ffi::c_void;
use std::process::Command;
use std::ptr;
use windows_sys::Win32::Foundation::{ERROR_ACCESS_DENIED, ERROR_FILE_NOT_FOUND, ERROR_SUCCESS};
use windows_sys::Win32::System::Registry::{
    HKEY, HKEY_LOCAL_MACHINE, KEY_QUERY_VALUE, KEY_SET_VALUE, REG_EXPAND_SZ, REG_SAM_FLAGS,
    REG_SZ, RRF_NOEXPAND, RRF_RT_REG_EXPAND_SZ, RRF_RT_REG_SZ, RegCloseKey, RegGetValueW,
    RegOpenKeyExW, RegSetValueExW,
};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    HWND_BROADCAST, SMTO_ABORTIFHUNG, SendMessageTimeoutW, WM_SETTINGCHANGE,
};

const ENVIRONMENT_KEY: &str = r"SYSTEM\CurrentControlSet\Control\Session Manager\Environment";
const BROADCAST_TIMEOUT_MS: u32 = 5000;

const BROADCAST_SCRIPT: &str = r#"
try {
    $signature = @'
[DllImport("user32.dll", SetLastError = true, CharSet = CharSet.Auto)]
public static extern IntPtr SendMessageTimeout(
    IntPtr hWnd, uint Msg, UIntPtr wParam, string lParam,
    uint fuFlags, uint uTimeout, out UIntPtr lpdwResult);
'@
    $type = Add-Type -MemberDefinition $signature -Name "EnvBroadcast" -Namespace JdkSwitch -PassThru
    $result = [UIntPtr]::Zero
    [void]$type::SendMessageTimeout([IntPtr]0xffff, 0x001A, [UIntPtr]::Zero, "Environment", 2, 5000, [ref]$result)
    Write-Host "OK"
} catch {
    Write-Host "ERROR: $($_.Exception.Message)"
    exit 1
}
"#;

#[derive(Debug, Default, Clone, Copy)]
pub struct RegistryEnvironment;

impl RegistryEnvironment {
    pub fn new() -> Self {
        Self
    }
}

struct OpenKey(HKEY);

impl Drop for OpenKey {
    fn drop(&mut self) {
        unsafe {
            RegCloseKey(self.0);
        }
    }
}

fn to_wide(value: &str) -> Vec<u16> {
    value.encode_utf16().chain(std::iter::once(0)).collect()
}

fn open_environment_key(access: REG_SAM_FLAGS) -> Result<OpenKey, AccessError> {
    let subkey = to_wide(ENVIRONMENT_KEY);
    let mut handle: HKEY = 0;

    let status =
        unsafe { RegOpenKeyExW(HKEY_LOCAL_MACHINE, subkey.as_ptr(), 0, access, &mut handle) };

    match status {
        ERROR_SUCCESS => Ok(OpenKey(handle)),
        ERROR_ACCESS_DENIED => Err(AccessError::AccessDenied {
            name: ENVIRONMENT_KEY.to_string(),
        }),
        code => Err(AccessError::OpenKey { code }),
    }
}

impl EnvironmentAccessor for RegistryEnvironment {
    fn get_var(&self, name: &str) -> Result<String, AccessError> {
        let key = open_environment_key(KEY_QUERY_VALUE)?;
        let value_name = to_wide(name);
        // Raw values keep references such as %SystemRoot% unexpanded.
        let flags = RRF_RT_REG_SZ | RRF_RT_REG_EXPAND_SZ | RRF_NOEXPAND;

        let mut size_bytes: u32 = 0;
        let status = unsafe {
            RegGetValueW(
                key.0,
                ptr::null(),
                value_name.as_ptr(),
                flags,
                ptr::null_mut(),
                ptr::null_mut(),
                &mut size_bytes,
            )
        };

        match status {
            ERROR_SUCCESS => {}
            ERROR_FILE_NOT_FOUND => return Ok(String::new()),
            ERROR_ACCESS_DENIED => {
                return Err(AccessError::AccessDenied {
                    name: name.to_string(),
                });
            }
            code => {
                return Err(AccessError::Read {
                    name: name.to_string(),
                    code,
                });
            }
        }

        let mut buffer: Vec<u16> = vec![0u16; (size_bytes as usize / 2).max(1)];
        let status = unsafe {
            RegGetValueW(
                key.0,
                ptr::null(),
                value_name.as_ptr(),
                flags,
                ptr::null_mut(),
                buffer.as_mut_ptr() as *mut c_void,
                &mut size_bytes,
            )
        };

        if status != ERROR_SUCCESS {
            return Err(AccessError::Read {
                name: name.to_string(),
                code: status,
            });
        }

        // size_bytes counts the terminating null.
        let char_len = (size_bytes as usize / 2).saturating_sub(1);
        buffer.truncate(char_len);
        Ok(String::from_utf16_lossy(&buffer))
    }

    fn set_var(&self, name: &str, value: &str) -> Result<(), AccessError> {
        let key = open_environment_key(KEY_SET_VALUE)?;
        let value_name = to_wide(name);
        let data = to_wide(value);
        let value_type = if needs_expansion(value) {
            REG_EXPAND_SZ
        } else {
            REG_SZ
        };

        let status = unsafe {
            RegSetValueExW(
                key.0,
                value_name.as_ptr(),
                0,
                value_type,
                data.as_ptr() as *const u8,
                (data.len() * 2) as u32,
            )
        };

        match status {
            ERROR_SUCCESS => Ok(()),
            ERROR_ACCESS_DENIED => Err(AccessError::AccessDenied {
                name: name.to_string(),
            }),
            code => Err(AccessError::Write {
                name: name.to_string(),
                code,
            }),
        }
    }

    fn broadcast_change(&self) -> Result<(), AccessError> {
        let area = to_wide("Environment");
        let mut result: usize = 0;

        let sent = unsafe {
            SendMessageTimeoutW(
                HWND_BROADCAST,
                WM_SETTINGCHANGE,
                0,
                area.as_ptr() as isize,
                SMTO_ABORTIFHUNG,
                BROADCAST_TIMEOUT_MS,
                &mut result,
            )
        };

        if sent != 0 {
            return Ok(());
        }

        tracing::debug!("SendMessageTimeoutW failed, falling back to powershell");
        broadcast_with_powershell()
    }
}

fn broadcast_with_powershell() -> Result<(), AccessError> {
    let output = Command::new("powershell")
        .args(["-NoProfile", "-NonInteractive", "-Command", BROADCAST_SCRIPT])
        .output()
        .map_err(|e| AccessError::Broadcast {
            reason: format!("failed to launch powershell: {}", e),
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stdout = stdout.trim();

    if !output.status.success() || stdout.contains("ERROR:") {
        return Err(AccessError::Broadcast {
            reason: format!("powershell exited with {}: {}", output.status, stdout),
        });
    }

    Ok(())
}
