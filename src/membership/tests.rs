#[cfg(test)]
mod tests {
    use crate::membership::service::Membership;
    use crate::membership::types::State;
    use std::collections::HashMap;

    fn state(ts: i64, bindings: &[(&str, &str)]) -> State {
        let nodes: HashMap<String, String> = bindings
            .iter()
            .map(|(id, addr)| (id.to_string(), addr.to_string()))
            .collect();
        State { nodes, ts }
    }

    #[test]
    fn new_view_contains_only_self() {
        let membership = Membership::new("node1", "node1:8080");

        let snapshot = membership.snapshot();
        assert_eq!(snapshot.nodes.len(), 1);
        assert_eq!(
            membership.lookup("node1"),
            Some("node1:8080".to_string())
        );
        assert!(snapshot.ts > 0);
    }

    #[test]
    fn merge_absorbs_newer_state() {
        let membership = Membership::new("node1", "node1:8080");
        let ts = membership.snapshot().ts;

        membership.merge(&state(ts + 1, &[("node2", "node2:8080"), ("node3", "node3:8080")]));

        assert_eq!(membership.lookup("node2"), Some("node2:8080".to_string()));
        assert_eq!(membership.lookup("node3"), Some("node3:8080".to_string()));
        assert_eq!(membership.snapshot().ts, ts + 1);
    }

    #[test]
    fn merge_ignores_older_state() {
        let membership = Membership::new("node1", "node1:8080");
        let ts = membership.snapshot().ts;

        membership.merge(&state(ts - 1, &[("node2", "node2:8080")]));
        membership.merge(&state(ts, &[("node3", "node3:8080")]));

        assert_eq!(membership.lookup("node2"), None);
        assert_eq!(membership.lookup("node3"), None);
        assert_eq!(membership.snapshot().ts, ts);
    }

    #[test]
    fn larger_ts_state_is_absorbing() {
        let a = Membership::new("node1", "node1:8080");
        let b = Membership::new("node2", "node2:8080");

        let newest = state(i64::MAX, &[("node9", "node9:8080")]);
        a.merge(&newest);
        b.merge(&newest);

        assert_eq!(a.lookup("node9"), Some("node9:8080".to_string()));
        assert_eq!(b.lookup("node9"), Some("node9:8080".to_string()));
        assert_eq!(a.snapshot().ts, i64::MAX);
        assert_eq!(b.snapshot().ts, i64::MAX);
    }

    #[test]
    fn merge_preserves_self_binding() {
        let membership = Membership::new("node1", "node1:8080");
        let ts = membership.snapshot().ts;

        // A peer ships a stale address for us under a newer timestamp.
        membership.merge(&state(ts + 1, &[("node1", "elsewhere:9999"), ("node2", "node2:8080")]));

        assert_eq!(membership.lookup("node1"), Some("node1:8080".to_string()));
        assert_eq!(membership.lookup("node2"), Some("node2:8080".to_string()));
    }

    #[test]
    fn ts_is_monotone_across_merges() {
        let membership = Membership::new("node1", "node1:8080");
        let start = membership.snapshot().ts;

        membership.merge(&state(start + 10, &[("node2", "node2:8080")]));
        membership.merge(&state(start + 5, &[("node3", "node3:8080")]));
        membership.merge(&state(start + 20, &[("node4", "node4:8080")]));

        assert_eq!(membership.snapshot().ts, start + 20);
        assert_eq!(membership.lookup("node3"), None);
        assert_eq!(membership.lookup("node4"), Some("node4:8080".to_string()));
    }

    #[test]
    fn lookup_unknown_node_is_none() {
        let membership = Membership::new("node1", "node1:8080");
        assert_eq!(membership.lookup("ghost"), None);
    }
}
