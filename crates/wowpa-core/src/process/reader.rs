#![cfg_attr(not(target_os = "windows"), allow(dead_code, unused_variables))]

use crate::error::{Error, Result};
use crate::position::Vec3;
use crate::process::ProcessHandle;
use crate::process::layout::MemoryAddress;

#[cfg(target_os = "windows")]
use windows::Win32::System::Diagnostics::Debug::ReadProcessMemory;

/// Trait for reading memory from a process or buffer
///
/// This trait enables mocking for tests and abstracts over different memory sources.
/// All multi-byte values are little-endian, matching the x86 client.
pub trait ReadMemory {
    /// Read exactly `size` bytes at the given address
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>>;

    /// Read a fixed-size array, rejecting short reads
    fn read_array<const N: usize>(&self, address: u64) -> Result<[u8; N]> {
        let bytes = self.read_bytes(address, N)?;
        let len = bytes.len();
        bytes.try_into().map_err(|_| Error::MemoryReadFailed {
            address,
            message: format!("Expected {} bytes, got {}", N, len),
        })
    }

    fn read_u8(&self, address: u64) -> Result<u8> {
        let [byte] = self.read_array::<1>(address)?;
        Ok(byte)
    }

    fn read_i32(&self, address: u64) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_array(address)?))
    }

    fn read_u32(&self, address: u64) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array(address)?))
    }

    fn read_f32(&self, address: u64) -> Result<f32> {
        Ok(f32::from_le_bytes(self.read_array(address)?))
    }

    /// Read three consecutive floats
    fn read_vec3(&self, address: u64) -> Result<Vec3> {
        let bytes: [u8; 12] = self.read_array(address)?;
        let mut values = [0f32; 3];
        for (value, chunk) in values.iter_mut().zip(bytes.chunks_exact(4)) {
            *value = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Ok(Vec3::from_array(values))
    }

    /// Read the full width of a layout field
    fn read_field(&self, field: MemoryAddress) -> Result<Vec<u8>> {
        self.read_bytes(field.address, field.width)
    }
}

impl<T: ReadMemory> ReadMemory for &T {
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        (**self).read_bytes(address, size)
    }
}

pub struct MemoryReader<'a> {
    process: &'a ProcessHandle,
}

impl<'a> MemoryReader<'a> {
    pub fn new(process: &'a ProcessHandle) -> Self {
        Self { process }
    }

    #[cfg(target_os = "windows")]
    fn read_bytes_impl(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; size];
        let mut bytes_read = 0;

        // SAFETY: ReadProcessMemory is called with:
        // - A valid process handle from ProcessHandle (obtained via OpenProcess with PROCESS_VM_READ)
        // - An address within the target process's address space
        // - A properly allocated buffer of the requested size
        // - A pointer to receive the actual bytes read
        // The function may fail if the address is invalid, but this is handled via Result.
        unsafe {
            ReadProcessMemory(
                self.process.handle(),
                address as *const _,
                buffer.as_mut_ptr() as *mut _,
                size,
                Some(&mut bytes_read),
            )
            .map_err(|e| Error::MemoryReadFailed {
                address,
                message: e.to_string(),
            })?;
        }

        // Partial reads are errors: a half-read vector or name is never usable.
        if bytes_read != size {
            return Err(Error::MemoryReadFailed {
                address,
                message: format!("Expected {} bytes, read {}", size, bytes_read),
            });
        }

        Ok(buffer)
    }

    #[cfg(not(target_os = "windows"))]
    fn read_bytes_impl(&self, address: u64, _size: usize) -> Result<Vec<u8>> {
        Err(Error::MemoryReadFailed {
            address,
            message: "Windows only: memory reading not supported on this platform".to_string(),
        })
    }
}

impl ReadMemory for MemoryReader<'_> {
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        self.read_bytes_impl(address, size)
    }
}

impl ReadMemory for ProcessHandle {
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        MemoryReader::new(self).read_bytes(address, size)
    }
}
