use super::encoder::Encoder;
use super::encoder::World;
use super::game::CfrGame;
use super::profile::Profile;
use super::tree::Frame;
use super::tree::Tree;
use super::turn::Turn;
use crate::Probability;
use crate::RESPONSE_NODE_LIMIT;
use crate::Utility;
use petgraph::graph::NodeIndex;
use std::collections::BTreeMap;
use std::collections::HashMap;

/// Best response against the average strategy over a fixed set of worlds.
///
/// The public tree is expanded once. Chance nodes split the world set by
/// which public successor each world reveals, so every node carries the
/// worlds consistent with it. For each player, opponent reach is pushed
/// down the tree, then values are backed up with that player choosing,
/// per information set, the action with the highest reach-weighted value.
///
/// The estimate is NashConv averaged over players, in the root's unit.
pub struct Response<'a, N: Encoder> {
    encoder: &'a N,
    profile: &'a Profile<N::I>,
    worlds: &'a [World<N>],
}

impl<'a, N: Encoder> Response<'a, N> {
    pub fn new(encoder: &'a N, profile: &'a Profile<N::I>, worlds: &'a [World<N>]) -> Self {
        Self {
            encoder,
            profile,
            worlds,
        }
    }

    /// None when there are no worlds or the public tree is too large.
    pub fn exploitability(&self, root: &N::G) -> Option<Utility> {
        if self.worlds.is_empty() {
            return None;
        }
        let (tree, sets) = self.expand(root)?;
        let players = root.players().max(1);
        let nashconv = (0..players)
            .map(|player| self.gap(&tree, &sets, player))
            .sum::<Utility>();
        let estimate = nashconv / players as Utility / root.unit();
        estimate.is_finite().then_some(estimate.max(0.0))
    }

    fn expand(&self, root: &N::G) -> Option<(Tree<N::G, N::I>, Vec<Vec<usize>>)> {
        let (mut tree, head) = Tree::new(root.clone());
        let mut sets = vec![(0..self.worlds.len()).collect::<Vec<_>>()];
        let mut todo = vec![head];
        while let Some(index) = todo.pop() {
            if tree.len() > RESPONSE_NODE_LIMIT {
                log::debug!("best response abandoned past {} nodes", RESPONSE_NODE_LIMIT);
                return None;
            }
            let game = tree.at(index).game.clone();
            let history = tree.at(index).history;
            let worlds = sets[index.index()].clone();
            match game.turn() {
                Turn::Terminal => {}
                Turn::Chance => {
                    let mut groups = Vec::<(N::G, Vec<usize>)>::new();
                    let mut lookup = HashMap::<N::G, usize>::new();
                    for w in worlds {
                        let child = game.reveal(&self.worlds[w]);
                        match lookup.get(&child) {
                            Some(&g) => groups[g].1.push(w),
                            None => {
                                lookup.insert(child.clone(), groups.len());
                                groups.push((child, vec![w]));
                            }
                        }
                    }
                    for (slot, (child, members)) in groups.into_iter().enumerate() {
                        todo.push(tree.grow(index, slot, Frame::new(child, history.reveal())));
                        sets.push(members);
                    }
                }
                Turn::Choice(_) => {
                    for (slot, edge) in game.menu().iter().enumerate() {
                        let frame = Frame::new(game.apply(edge), history.push(&edge));
                        todo.push(tree.grow(index, slot, frame));
                        sets.push(worlds.clone());
                    }
                }
            }
        }
        Some((tree, sets))
    }

    /// best response value minus on-policy value for one player
    fn gap(&self, tree: &Tree<N::G, N::I>, sets: &[Vec<usize>], player: usize) -> Utility {
        let n = tree.len();
        let k = self.worlds.len();
        let mut reach = vec![vec![0.0 as Probability; k]; n];
        let mut best = vec![vec![0.0 as Utility; k]; n];
        let mut mean = vec![vec![0.0 as Utility; k]; n];
        for &w in sets[0].iter() {
            reach[0][w] = 1.0;
        }
        for index in tree.indices() {
            let i = index.index();
            let frame = tree.at(index);
            let children = tree.children(index);
            match frame.game.turn() {
                Turn::Choice(actor) if actor != player => {
                    for &w in sets[i].iter() {
                        let policy = self.policy(frame, w);
                        for &(slot, child) in children.iter() {
                            reach[child.index()][w] = reach[i][w] * policy[slot];
                        }
                    }
                }
                _ => {
                    for &(_, child) in children.iter() {
                        for &w in sets[child.index()].iter() {
                            reach[child.index()][w] = reach[i][w];
                        }
                    }
                }
            }
        }
        for index in tree.indices().rev() {
            let i = index.index();
            let frame = tree.at(index);
            let children = tree.children(index);
            match frame.game.turn() {
                Turn::Terminal => {
                    for &w in sets[i].iter() {
                        let utility = frame.game.payoff(&self.worlds[w], player);
                        best[i][w] = utility;
                        mean[i][w] = utility;
                    }
                }
                Turn::Chance => {
                    for &(_, child) in children.iter() {
                        for &w in sets[child.index()].iter() {
                            let (b, m) = (best[child.index()][w], mean[child.index()][w]);
                            best[i][w] = b;
                            mean[i][w] = m;
                        }
                    }
                }
                Turn::Choice(actor) => {
                    let mut groups = BTreeMap::<N::I, Vec<usize>>::new();
                    for &w in sets[i].iter() {
                        let info = self.encoder.info(&frame.game, &self.worlds[w], &frame.history);
                        let policy = self.profile.average(&info, frame.game.menu().len());
                        let m = expectation(&children, &policy, &mean, w);
                        mean[i][w] = m;
                        if actor == player {
                            groups.entry(info).or_default().push(w);
                        } else {
                            let b = expectation(&children, &policy, &best, w);
                            best[i][w] = b;
                        }
                    }
                    for (_, members) in groups {
                        let choice = children
                            .iter()
                            .map(|&(_, child)| {
                                let weight = members
                                    .iter()
                                    .map(|&w| reach[i][w] * best[child.index()][w])
                                    .sum::<Utility>();
                                (child, weight)
                            })
                            .max_by(|a, b| a.1.total_cmp(&b.1))
                            .map(|(child, _)| child);
                        if let Some(child) = choice {
                            for &w in members.iter() {
                                let b = best[child.index()][w];
                                best[i][w] = b;
                            }
                        }
                    }
                }
            }
        }
        let best = sets[0].iter().map(|&w| best[0][w]).sum::<Utility>() / k as Utility;
        let mean = sets[0].iter().map(|&w| mean[0][w]).sum::<Utility>() / k as Utility;
        (best - mean).max(0.0)
    }

    fn policy(&self, frame: &Frame<N::G, N::I>, w: usize) -> Vec<Probability> {
        let info = self.encoder.info(&frame.game, &self.worlds[w], &frame.history);
        self.profile.average(&info, frame.game.menu().len())
    }
}

fn expectation(
    children: &[(usize, NodeIndex)],
    policy: &[Probability],
    values: &[Vec<Utility>],
    w: usize,
) -> Utility {
    children
        .iter()
        .map(|&(slot, child)| {
            policy.get(slot).copied().unwrap_or_default() * values[child.index()][w]
        })
        .sum()
}
