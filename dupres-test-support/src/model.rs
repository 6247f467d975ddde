//! An abstract `stateright` model of the duplicate-resolution protocol
//! (spec.md §4.4, §8's testable properties), independent of this crate's
//! concrete types: just enough state to let the checker explore every ack
//! interleaving, including duplicate and late delivery.
//!
//! Grounded on the single-actor-type, peer-list-parameterized shape used by
//! `stateright`'s own replicated-processor example: every node in the
//! system is the same `Actor` impl, distinguished only by its `Role`.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use stateright::actor::{Actor, Id, Out};

#[derive(Clone, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub enum ModelMsg {
    Req { tid: u32 },
    Ack { tid: u32, generation: u32 },
}

#[derive(Clone)]
pub enum Role {
    /// A duplicate-holding peer: stateless, always acks with a fixed
    /// generation. Two peers with equal generations model a real tie.
    Replica { generation: u32 },
    /// A stand-in for `dupres_coordinator::Entry` plus the step 1/3/4/7/8
    /// portion of `handle_ack`: enough to check idempotence and
    /// exactly-once completion without modeling storage or the wire.
    Coordinator { peers: Vec<Id> },
}

#[derive(Clone, Debug, Eq, Hash, PartialEq, Default)]
pub struct ModelState {
    pub tid: u32,
    pub dest_complete: Vec<bool>,
    pub complete: bool,
    pub best_generation: Option<u32>,
}

pub struct ProtocolActor {
    pub role: Role,
}

impl Actor for ProtocolActor {
    type Msg = ModelMsg;
    type State = ModelState;

    fn on_start(&self, _id: Id, o: &mut Out<Self>) -> Self::State {
        match &self.role {
            Role::Replica { .. } => ModelState::default(),
            Role::Coordinator { peers } => {
                for &peer in peers {
                    o.send(peer, ModelMsg::Req { tid: 1 });
                }
                ModelState {
                    tid: 1,
                    dest_complete: vec![false; peers.len()],
                    complete: false,
                    best_generation: None,
                }
            }
        }
    }

    fn on_msg(&self, _id: Id, state: &mut Cow<Self::State>, src: Id, msg: Self::Msg, o: &mut Out<Self>) {
        match &self.role {
            Role::Replica { generation } => {
                if let ModelMsg::Req { tid } = msg {
                    o.send(src, ModelMsg::Ack { tid, generation: *generation });
                    // A spurious duplicate, modeling a responder retry or
                    // fabric-level retransmit: the coordinator must tolerate it.
                    o.send(src, ModelMsg::Ack { tid, generation: *generation });
                }
            }
            Role::Coordinator { peers } => {
                let ModelMsg::Ack { tid, generation } = msg else {
                    return;
                };
                if tid != state.tid || state.complete {
                    return;
                }
                let Some(i) = peers.iter().position(|&p| p == src) else {
                    return;
                };
                if state.dest_complete[i] {
                    return; // idempotence: duplicate ack from the same peer is a no-op
                }

                let state = state.to_mut();
                state.dest_complete[i] = true;
                state.best_generation = Some(state.best_generation.map_or(generation, |b| b.max(generation)));
                if state.dest_complete.iter().all(|&c| c) {
                    state.complete = true;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stateright::actor::{model_peers, DuplicatingNetwork, Envelope, System, SystemModel};
    use stateright::{Checker, Model, Property};

    struct DupResSystem {
        replica_count: usize,
    }

    impl System for DupResSystem {
        type Actor = ProtocolActor;
        type History = ();

        fn actors(&self) -> Vec<Self::Actor> {
            let mut actors: Vec<Self::Actor> = (0..self.replica_count)
                .map(|_| ProtocolActor {
                    role: Role::Replica { generation: 1 },
                })
                .collect();
            actors.push(ProtocolActor {
                role: Role::Coordinator {
                    peers: model_peers(0, self.replica_count),
                },
            });
            actors
        }

        fn duplicating_network(&self) -> DuplicatingNetwork {
            DuplicatingNetwork::Yes
        }

        fn init_network(&self) -> Vec<Envelope<ModelMsg>> {
            Vec::new()
        }

        fn properties(&self) -> Vec<Property<SystemModel<Self>>> {
            vec![
                Property::<SystemModel<Self>>::always("completion implies every destination acked", |_, state| {
                    state.actor_states.iter().all(|s| !s.complete || s.dest_complete.iter().all(|&d| d))
                }),
                Property::<SystemModel<Self>>::sometimes("the coordinator can complete", |_, state| {
                    state.actor_states.iter().any(|s| s.complete)
                }),
            ]
        }
    }

    #[test]
    fn duplicate_acks_never_break_the_completion_invariant() {
        DupResSystem { replica_count: 2 }
            .into_model()
            .checker()
            .spawn_dfs()
            .join()
            .assert_properties();
    }
}
