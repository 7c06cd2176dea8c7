//! Thin owned wrapper over Win32 registry keys

use windows::core::{Error, Result, HSTRING};
use windows::Win32::Foundation::{ERROR_FILE_NOT_FOUND, HANDLE};
use windows::Win32::System::Registry::{
    RegCloseKey, RegDeleteValueW, RegNotifyChangeKeyValue, RegOpenKeyExW, RegQueryValueExW,
    RegSetValueExW, HKEY, REG_NOTIFY_CHANGE_LAST_SET, REG_NOTIFY_CHANGE_NAME, REG_SAM_FLAGS,
    REG_SZ, REG_VALUE_TYPE,
};

pub use windows::Win32::System::Registry::{
    HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, KEY_NOTIFY, KEY_QUERY_VALUE, KEY_READ, KEY_SET_VALUE,
};

/// Open registry key, closed on drop
pub struct RegKey(HKEY);

impl RegKey {
    pub fn open(root: HKEY, subkey: &str, access: REG_SAM_FLAGS) -> Result<Self> {
        let mut key = HKEY::default();
        unsafe { RegOpenKeyExW(root, &HSTRING::from(subkey), 0, access, &mut key) }.ok()?;
        Ok(Self(key))
    }

    /// Raw value bytes, `None` if the value does not exist
    pub fn read_bytes(&self, name: &str) -> Result<Option<(REG_VALUE_TYPE, Vec<u8>)>> {
        let name = HSTRING::from(name);
        let mut kind = REG_VALUE_TYPE::default();
        let mut len = 0u32;

        let status = unsafe {
            RegQueryValueExW(self.0, &name, None, Some(&mut kind), None, Some(&mut len))
        };
        if status == ERROR_FILE_NOT_FOUND {
            return Ok(None);
        }
        status.ok()?;

        let mut data = vec![0u8; len as usize];
        unsafe {
            RegQueryValueExW(
                self.0,
                &name,
                None,
                Some(&mut kind),
                Some(data.as_mut_ptr()),
                Some(&mut len),
            )
        }
        .ok()?;
        data.truncate(len as usize);
        Ok(Some((kind, data)))
    }

    pub fn read_dword(&self, name: &str) -> Result<Option<u32>> {
        Ok(self.read_bytes(name)?.and_then(|(_, data)| {
            data.get(..4)
                .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        }))
    }

    pub fn read_binary(&self, name: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.read_bytes(name)?.map(|(_, data)| data))
    }

    pub fn read_string(&self, name: &str) -> Result<Option<String>> {
        Ok(self.read_bytes(name)?.map(|(_, data)| {
            let wide: Vec<u16> = data
                .chunks_exact(2)
                .map(|c| u16::from_le_bytes([c[0], c[1]]))
                .take_while(|&c| c != 0)
                .collect();
            String::from_utf16_lossy(&wide)
        }))
    }

    pub fn write_string(&self, name: &str, value: &str) -> Result<()> {
        let bytes: Vec<u8> = value
            .encode_utf16()
            .chain(std::iter::once(0))
            .flat_map(u16::to_le_bytes)
            .collect();
        unsafe { RegSetValueExW(self.0, &HSTRING::from(name), 0, REG_SZ, Some(&bytes)) }.ok()
    }

    /// Delete a value; a missing value is not an error
    pub fn delete_value(&self, name: &str) -> Result<()> {
        let status = unsafe { RegDeleteValueW(self.0, &HSTRING::from(name)) };
        if status == ERROR_FILE_NOT_FOUND {
            return Ok(());
        }
        status.ok()
    }

    /// Arm a one-shot change notification on `event` for this key and its subkeys
    pub fn notify_change(&self, event: HANDLE) -> Result<()> {
        unsafe {
            RegNotifyChangeKeyValue(
                self.0,
                true,
                REG_NOTIFY_CHANGE_NAME | REG_NOTIFY_CHANGE_LAST_SET,
                event,
                true,
            )
        }
        .ok()
    }
}

impl Drop for RegKey {
    fn drop(&mut self) {
        unsafe {
            let _ = RegCloseKey(self.0);
        }
    }
}

/// True when a registry error means "the key or value is missing"
pub fn is_not_found(error: &Error) -> bool {
    error.code() == ERROR_FILE_NOT_FOUND.to_hresult()
}
