//! The hook through which the instance table tells the external command surface that a name went away.

use std::fmt;

/// The external command surface an [`InstanceTable`](crate::InstanceTable) reports retired names to.
///
/// The table never creates commands itself; whoever registers an instance is responsible for exposing it. When
/// the name is retired, the table calls [`retire_command`](CommandSurface::retire_command) exactly once so the
/// surface can drop whatever it exposed for that name.
///
/// Any `Fn(&str)` closure is a command surface:
///
/// ```
/// use instance_table::InstanceTable;
///
/// let table = InstanceTable::new(|name: &str| println!("retired {name}"));
/// # let _ = table;
/// ```
pub trait CommandSurface {
    /// Removes the externally visible command bound to `name`.
    ///
    /// Called with no internal borrows held, so implementations may call back into the table.
    fn retire_command(&self, name: &str);
}

impl<F> CommandSurface for F
where
    F: Fn(&str),
{
    fn retire_command(&self, name: &str) {
        self(name)
    }
}

/// A command surface that ignores every notification.
///
/// Useful when the table is driven directly from native code with no scripting surface attached.
#[derive(Clone, Copy, Debug, Default)]
pub struct DetachedSurface;

impl CommandSurface for DetachedSurface {
    fn retire_command(&self, _name: &str) {}
}

pub(crate) struct BoxSurface(pub(crate) Box<dyn CommandSurface>);

impl fmt::Debug for BoxSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CommandSurface")
    }
}
