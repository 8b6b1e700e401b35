//! Fact Providers
//!
//! Linux implementations of [`FactSource`]. Each [`Module`] variant maps to
//! one producer; the producers split into a thin reader (file, command or
//! environment) and a pure parser that the tests exercise.
//!
//! | Module   | Source                                   |
//! |----------|------------------------------------------|
//! | OS       | `/etc/os-release`, `uname -m`            |
//! | Host     | `/sys/devices/virtual/dmi/id`            |
//! | Kernel   | `uname -r`                               |
//! | Uptime   | `/proc/uptime`                           |
//! | Memory   | `/proc/meminfo`                          |
//! | CPU      | `/proc/cpuinfo` (one row per package)    |
//! | GPU      | `lspci -mm` (one row per display device) |
//! | WM       | desktop session variables                |
//! | Shell    | `$SHELL`                                 |
//! | Editor   | `$VISUAL`, `$EDITOR`                     |
//! | Terminal | `$TERM_PROGRAM`, `$TERM`                 |

mod env;
mod system;

use anyhow::{bail, Result};
use fetcha_core::FactSource;

/// A built-in fact module
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Module {
    /// Distribution name and architecture
    Os,
    /// Hardware model
    Host,
    /// Kernel release
    Kernel,
    /// Time since boot
    Uptime,
    /// Used and total memory
    Memory,
    /// Processor model, one row per package
    Cpu,
    /// Display adapters
    Gpu,
    /// Window manager or desktop session
    Wm,
    /// Login shell
    Shell,
    /// Preferred editor
    Editor,
    /// Terminal emulator
    Terminal,
}

impl Module {
    /// Every module, in default display order
    pub const ALL: [Module; 11] = [
        Module::Os,
        Module::Host,
        Module::Kernel,
        Module::Uptime,
        Module::Memory,
        Module::Cpu,
        Module::Gpu,
        Module::Wm,
        Module::Shell,
        Module::Editor,
        Module::Terminal,
    ];

    /// Display label, also the name accepted in the `modules` config list
    pub const fn label(self) -> &'static str {
        match self {
            Module::Os => "OS",
            Module::Host => "Host",
            Module::Kernel => "Kernel",
            Module::Uptime => "Uptime",
            Module::Memory => "Memory",
            Module::Cpu => "CPU",
            Module::Gpu => "GPU",
            Module::Wm => "WM",
            Module::Shell => "Shell",
            Module::Editor => "Editor",
            Module::Terminal => "Terminal",
        }
    }

    /// Look a module up by name, ignoring ASCII case
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(name))
    }
}

impl FactSource for Module {
    fn label(&self) -> &str {
        Module::label(*self)
    }

    fn produce(&self) -> Option<String> {
        let value = match self {
            Module::Os => system::os(),
            Module::Host => system::host(),
            Module::Kernel => system::kernel(),
            Module::Uptime => system::uptime(),
            Module::Memory => system::memory(),
            Module::Cpu => system::cpu(),
            Module::Gpu => system::gpu(),
            Module::Wm => env::wm(),
            Module::Shell => env::shell(),
            Module::Editor => env::editor(),
            Module::Terminal => env::terminal(),
        };
        if value.is_none() {
            tracing::debug!(module = Module::label(*self), "Module returned nothing");
        }
        value
    }
}

/// Build the fact sources for a render pass
///
/// `None` selects every module in default order. Names match
/// case-insensitively; the order given is the display order.
///
/// # Errors
///
/// Returns an error naming the first unknown module.
pub fn select(modules: Option<&[String]>) -> Result<Vec<Box<dyn FactSource>>> {
    let Some(names) = modules else {
        return Ok(Module::ALL
            .into_iter()
            .map(|m| Box::new(m) as Box<dyn FactSource>)
            .collect());
    };

    let mut sources: Vec<Box<dyn FactSource>> = Vec::with_capacity(names.len());
    for name in names {
        let Some(module) = Module::from_name(name) else {
            let available: Vec<&str> = Module::ALL.iter().map(|m| m.label()).collect();
            bail!("unknown module '{name}' (available: {})", available.join(", "));
        };
        sources.push(Box::new(module));
    }
    Ok(sources)
}
