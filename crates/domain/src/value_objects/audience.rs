//! Who rolled, and who gets to see it.

use crate::ids::PlayerId;

/// Broadcast target for a roll, computed per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Audience {
    /// The rolling player's own viewer - full per-die results
    Requester,
    /// The admin console - raw request specs and full results
    Admin,
    /// The public portrait display - totals only
    Public,
}

/// An authenticated caller, as vouched for by the session layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requester {
    id: PlayerId,
    admin: bool,
}

impl Requester {
    pub fn new(id: PlayerId, admin: bool) -> Self {
        Self { id, admin }
    }

    pub fn player(id: PlayerId) -> Self {
        Self::new(id, false)
    }

    pub fn admin(id: PlayerId) -> Self {
        Self::new(id, true)
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }

    /// Audiences that receive this requester's results, in delivery order.
    ///
    /// The admin audience is skipped when the requester is the admin.
    pub fn audiences(&self) -> Vec<Audience> {
        let mut audiences = vec![Audience::Requester];
        if !self.admin {
            audiences.push(Audience::Admin);
        }
        audiences.push(Audience::Public);
        audiences
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_results_reach_admin() {
        let requester = Requester::player(PlayerId::new(3));
        assert_eq!(
            requester.audiences(),
            vec![Audience::Requester, Audience::Admin, Audience::Public]
        );
    }

    #[test]
    fn admin_results_skip_admin_audience() {
        let requester = Requester::admin(PlayerId::new(1));
        assert!(requester.is_admin());
        assert_eq!(
            requester.audiences(),
            vec![Audience::Requester, Audience::Public]
        );
    }
}
