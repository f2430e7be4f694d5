//! Commands understood by the tiler.
//!
//! [`Command`] is the vocabulary every [`CommandSource`](crate::traits::CommandSource)
//! speaks.  On the wire it is JSON in serde's externally tagged form:
//!
//! ```json
//! {"Hotkey":"numpad7"}
//! {"Hotkey":103}
//! {"SetDivisionEnabled":{"division":{"columns":2,"rows":1,"x":1,"y":1},"enabled":false}}
//! {"SetMaxGrid":{"columns":4,"rows":3}}
//! ```

use crate::geometry::Division;
use crate::hotkey::KeyId;
use serde::{Deserialize, Serialize};

/// Every action the tiler can perform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// A registered hotkey was pressed.
    ///
    /// Numpad keys select an orientation; pressing the same key again cycles
    /// to the next division in that orientation.
    Hotkey(KeyId),

    /// Turn a division on or off.  Orientation buckets are rebuilt when the
    /// flag actually changes.
    SetDivisionEnabled { division: Division, enabled: bool },

    /// Change the largest grid considered.  Non-positive values leave no
    /// divisions at all.
    SetMaxGrid { columns: i32, rows: i32 },
}
