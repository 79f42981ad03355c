mod handle;
pub mod layout;
pub mod provider;
mod reader;

// Mock memory reader and provider for testing (always available for unit and integration tests)
#[doc(hidden)]
pub mod mock;

pub use handle::ProcessHandle;
pub use layout::{MemoryAddress, MemoryLayout};
pub use provider::{ProcessInfo, ProcessProvider, SystemProcessProvider};
pub use reader::{MemoryReader, ReadMemory};

#[doc(hidden)]
pub use mock::{MockMemoryBuilder, MockMemoryReader, MockProcess, MockProcessProvider};
