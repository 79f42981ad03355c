//! Mock memory reader and process provider for testing
//!
//! Provides configurable implementations of `ReadMemory` and
//! `ProcessProvider` backed by an in-memory buffer instead of a real process.

use std::cell::Cell;
use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::process::{ProcessInfo, ProcessProvider, ReadMemory};

/// Mock memory reader for testing
///
/// Reads from an in-memory buffer, allowing tests to verify memory reading
/// logic without requiring access to a real process. Reads starting at an
/// address registered with [`MockMemoryBuilder::fail_at`] always fail, and
/// every read past the [`MockMemoryBuilder::fail_after`] budget fails too.
#[derive(Debug, Clone)]
pub struct MockMemoryReader {
    data: Vec<u8>,
    base: u64,
    failing: HashSet<u64>,
    read_budget: Option<usize>,
    reads: Cell<usize>,
}

impl MockMemoryReader {
    /// Create a new mock reader with the given data at base address 0x1000
    pub fn new(data: Vec<u8>) -> Self {
        Self::with_base(data, 0x1000)
    }

    /// Create a new mock reader with custom base address
    pub fn with_base(data: Vec<u8>, base: u64) -> Self {
        Self {
            data,
            base,
            failing: HashSet::new(),
            read_budget: None,
            reads: Cell::new(0),
        }
    }

    pub fn base(&self) -> u64 {
        self.base
    }

    /// Get the size of the underlying buffer
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl ReadMemory for MockMemoryReader {
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        let reads = self.reads.get();
        self.reads.set(reads + 1);
        if self.read_budget.is_some_and(|budget| reads >= budget) {
            return Err(Error::MemoryReadFailed {
                address,
                message: format!("Simulated failure after {} reads", reads),
            });
        }
        if self.failing.contains(&address) {
            return Err(Error::MemoryReadFailed {
                address,
                message: "Simulated read failure".to_string(),
            });
        }
        if address < self.base {
            return Err(Error::MemoryReadFailed {
                address,
                message: format!("Address below base (base=0x{:X})", self.base),
            });
        }
        let offset = (address - self.base) as usize;
        if offset + size > self.data.len() {
            return Err(Error::MemoryReadFailed {
                address,
                message: format!(
                    "Out of bounds: offset={}, size={}, len={}",
                    offset,
                    size,
                    self.data.len()
                ),
            });
        }
        Ok(self.data[offset..offset + size].to_vec())
    }
}

/// Builder for creating test memory buffers
///
/// Provides a fluent API for constructing memory layouts for testing.
/// Offsets passed to the `write_*` methods are relative to the base address.
#[derive(Debug, Clone, Default)]
pub struct MockMemoryBuilder {
    data: Vec<u8>,
    base: u64,
    failing: HashSet<u64>,
    read_budget: Option<usize>,
}

impl MockMemoryBuilder {
    /// Create a new builder with default base address (0x1000)
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            base: 0x1000,
            failing: HashSet::new(),
            read_budget: None,
        }
    }

    /// Set the base address for the mock reader
    pub fn base(mut self, base: u64) -> Self {
        self.base = base;
        self
    }

    /// Pre-allocate buffer with zeros up to the specified size
    pub fn with_size(mut self, size: usize) -> Self {
        self.data.resize(size, 0);
        self
    }

    pub fn write_u8(mut self, offset: usize, value: u8) -> Self {
        self.ensure_size(offset + 1);
        self.data[offset] = value;
        self
    }

    /// Write a signed 32-bit integer at the specified offset from base
    pub fn write_i32(self, offset: usize, value: i32) -> Self {
        self.write_bytes(offset, &value.to_le_bytes())
    }

    pub fn write_f32(self, offset: usize, value: f32) -> Self {
        self.write_bytes(offset, &value.to_le_bytes())
    }

    /// Write three consecutive floats at the specified offset from base
    pub fn write_vec3(self, offset: usize, values: [f32; 3]) -> Self {
        let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.write_bytes(offset, &bytes)
    }

    /// Write raw bytes at the specified offset from base
    pub fn write_bytes(mut self, offset: usize, bytes: &[u8]) -> Self {
        self.ensure_size(offset + bytes.len());
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
        self
    }

    /// Write a null-terminated UTF-8 string at the specified offset
    pub fn write_utf8(mut self, offset: usize, text: &str) -> Self {
        let bytes = text.as_bytes();
        self.ensure_size(offset + bytes.len() + 1);
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
        self.data[offset + bytes.len()] = 0; // null terminator
        self
    }

    /// Make every read starting at this absolute address fail
    pub fn fail_at(mut self, address: u64) -> Self {
        self.failing.insert(address);
        self
    }

    /// Let the first `reads` reads through and fail every later one,
    /// e.g. a process that stops responding after a successful attach.
    pub fn fail_after(mut self, reads: usize) -> Self {
        self.read_budget = Some(reads);
        self
    }

    /// Build the MockMemoryReader
    pub fn build(self) -> MockMemoryReader {
        MockMemoryReader {
            data: self.data,
            base: self.base,
            failing: self.failing,
            read_budget: self.read_budget,
            reads: Cell::new(0),
        }
    }

    fn ensure_size(&mut self, required: usize) {
        if self.data.len() < required {
            self.data.resize(required, 0);
        }
    }
}

/// A fake attached process: process info plus a mock memory image.
#[derive(Debug, Clone)]
pub struct MockProcess {
    pub pid: u32,
    pub alive: bool,
    pub memory: MockMemoryReader,
}

impl MockProcess {
    pub fn new(pid: u32, memory: MockMemoryReader) -> Self {
        Self {
            pid,
            alive: true,
            memory,
        }
    }
}

impl ProcessInfo for MockProcess {
    fn pid(&self) -> u32 {
        self.pid
    }

    fn base_address(&self) -> u64 {
        self.memory.base()
    }

    fn module_size(&self) -> u32 {
        self.memory.len() as u32
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

impl ReadMemory for MockProcess {
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        self.memory.read_bytes(address, size)
    }
}

/// Mock process provider: finds its single process by name or pid.
#[derive(Debug, Clone)]
pub struct MockProcessProvider {
    pub name: String,
    pub process: Option<MockProcess>,
}

impl MockProcessProvider {
    pub fn new(name: impl Into<String>, process: MockProcess) -> Self {
        Self {
            name: name.into(),
            process: Some(process),
        }
    }

    /// A provider that never finds anything
    pub fn empty() -> Self {
        Self {
            name: String::new(),
            process: None,
        }
    }
}

impl ProcessProvider for MockProcessProvider {
    type Process = MockProcess;

    fn find_process(&self, name: &str) -> Result<Self::Process> {
        self.process
            .clone()
            .filter(|_| self.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::ProcessNotFound(format!("Process '{}' not found", name)))
    }

    fn open_process(&self, pid: u32) -> Result<Self::Process> {
        self.process
            .clone()
            .filter(|p| p.pid == pid)
            .ok_or_else(|| Error::ProcessNotFound(format!("Mock process {} not found", pid)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_reader_basic() {
        let data = vec![0x78, 0x56, 0x34, 0x12];
        let reader = MockMemoryReader::new(data);

        let value = reader.read_i32(0x1000).unwrap();
        assert_eq!(value, 0x12345678);
    }

    #[test]
    fn test_mock_reader_with_base() {
        let data = vec![0x01, 0x02, 0x03, 0x04];
        let reader = MockMemoryReader::with_base(data, 0x00AB_0000);

        let bytes = reader.read_bytes(0x00AB_0000, 4).unwrap();
        assert_eq!(bytes, vec![0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn test_mock_reader_below_base() {
        let data = vec![0x01, 0x02, 0x03, 0x04];
        let reader = MockMemoryReader::with_base(data, 0x2000);

        let result = reader.read_bytes(0x1000, 4);
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_typed_writes() {
        let reader = MockMemoryBuilder::new()
            .write_u8(0, 1)
            .write_i32(4, -7)
            .write_f32(8, 0.5)
            .write_vec3(12, [1.0, 2.0, 3.0])
            .build();

        assert_eq!(reader.read_u8(0x1000).unwrap(), 1);
        assert_eq!(reader.read_i32(0x1004).unwrap(), -7);
        assert_eq!(reader.read_f32(0x1008).unwrap(), 0.5);
        assert_eq!(reader.read_vec3(0x100C).unwrap().to_array(), [1.0, 2.0, 3.0]);
        assert_eq!(reader.len(), 24);
    }

    #[test]
    fn test_builder_with_size() {
        let reader = MockMemoryBuilder::new()
            .with_size(100)
            .write_i32(96, 123)
            .build();

        assert_eq!(reader.len(), 100);
        assert_eq!(reader.read_i32(0x1000 + 96).unwrap(), 123);
    }

    #[test]
    fn test_builder_utf8() {
        let reader = MockMemoryBuilder::new()
            .with_size(16)
            .write_utf8(0, "Hello")
            .build();

        let bytes = reader.read_bytes(0x1000, 6).unwrap();
        assert_eq!(bytes, b"Hello\0");
    }

    #[test]
    fn test_fail_at() {
        let reader = MockMemoryBuilder::new()
            .with_size(16)
            .fail_at(0x1004)
            .build();

        assert!(reader.read_i32(0x1000).is_ok());
        assert!(matches!(
            reader.read_i32(0x1004),
            Err(Error::MemoryReadFailed { address: 0x1004, .. })
        ));
    }

    #[test]
    fn test_mock_provider_find_process() {
        let process = MockProcess::new(1234, MockMemoryReader::new(vec![0; 4]));
        let provider = MockProcessProvider::new("Wow.exe", process);

        let found = provider.find_process("wow.exe").unwrap();
        assert_eq!(found.pid(), 1234);
        assert!(found.is_alive());
        assert_eq!(found.base_address(), 0x1000);
    }

    #[test]
    fn test_mock_provider_wrong_name() {
        let process = MockProcess::new(1234, MockMemoryReader::new(vec![]));
        let provider = MockProcessProvider::new("Wow.exe", process);

        assert!(matches!(
            provider.find_process("Other.exe"),
            Err(Error::ProcessNotFound(_))
        ));
    }

    #[test]
    fn test_mock_provider_open_process() {
        let process = MockProcess::new(1234, MockMemoryReader::new(vec![]));
        let provider = MockProcessProvider::new("Wow.exe", process);

        assert_eq!(provider.open_process(1234).unwrap().pid(), 1234);
        assert!(provider.open_process(9999).is_err());
    }

    #[test]
    fn test_empty_provider() {
        let provider = MockProcessProvider::empty();
        assert!(provider.find_process("Wow.exe").is_err());
    }

    #[test]
    fn test_fail_after_read_budget() {
        let reader = MockMemoryBuilder::new()
            .write_i32(0, 42)
            .fail_after(2)
            .build();

        assert_eq!(reader.read_i32(0x1000).unwrap(), 42);
        assert_eq!(reader.read_i32(0x1000).unwrap(), 42);
        assert!(matches!(
            reader.read_i32(0x1000),
            Err(Error::MemoryReadFailed { address: 0x1000, .. })
        ));
    }
}
