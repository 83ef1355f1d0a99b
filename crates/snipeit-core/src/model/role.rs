// Synthetic roles
//
// Snipe-IT has no role entity. The connector exposes a fixed set of roles
// whose membership is read from the `superuser`/`admin` permission flags and
// whose entitlements are the remaining permission keys.

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Role {
    Superuser,
    Admin,
    Other,
}

impl Role {
    /// `Superuser` and `Admin` are held wholesale rather than per permission.
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Superuser | Self::Admin)
    }

    /// Permission-map key carrying membership of this role.
    pub fn permission_key(self) -> String {
        self.to_string().to_lowercase()
    }
}
