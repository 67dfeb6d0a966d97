//! # Collective Synchronization Primitives
//!
//! The inter-island barrier is built from two collectives: a broadcast
//! (one-to-all) that delivers a segment command to every island, and a gather
//! (all-to-one) that blocks until every island has reported its segment best.
//! Together they give the hard ordering guarantee: no island observes segment
//! `N + 1` before all islands have reported segment `N`.
//!
//! This realization uses one `std::sync::mpsc` channel pair per island. The
//! same narrow surface could be backed by RPC fan-out or a message-passing
//! runtime for a multi-host deployment; the coordinator only depends on
//! `broadcast` and `gather`.
//!
//! A disconnected island (crashed worker thread) surfaces as
//! `GaError::IslandFailure` and aborts the run; there is no partial-result
//! recovery.

use std::sync::mpsc::{channel, Receiver, Sender};

use crate::error::{GaError, Result};
use crate::island::IslandReport;
use crate::route::Route;

/// A command broadcast to every island at the start of a segment.
#[derive(Debug, Clone)]
pub struct SegmentCommand {
    /// Zero-based segment index.
    pub segment: usize,
    /// Generations to evolve in this segment.
    pub generations: usize,
    /// The global best from the previous barrier, if any, for elite injection.
    pub elite: Option<Route>,
}

/// The island-side endpoint of the collectives.
#[derive(Debug)]
pub struct IslandEndpoint {
    commands: Receiver<SegmentCommand>,
    reports: Sender<Result<IslandReport>>,
}

impl IslandEndpoint {
    /// Blocks for the next segment command.
    ///
    /// Returns `None` when the coordinator has shut the collective down,
    /// which is the island's signal to exit.
    pub fn next_command(&self) -> Option<SegmentCommand> {
        self.commands.recv().ok()
    }

    /// Submits the island's segment outcome to the gather side.
    ///
    /// Returns false when the coordinator is gone; the island should exit.
    pub fn submit(&self, report: Result<IslandReport>) -> bool {
        self.reports.send(report).is_ok()
    }
}

/// The coordinator-side handle over all islands' channel pairs.
#[derive(Debug)]
pub struct Collective {
    links: Vec<(Sender<SegmentCommand>, Receiver<Result<IslandReport>>)>,
}

impl Collective {
    /// Creates the channel pairs for `num_islands` islands.
    ///
    /// Returns the coordinator handle and one endpoint per island, in island
    /// order.
    pub fn new(num_islands: usize) -> (Self, Vec<IslandEndpoint>) {
        let mut links = Vec::with_capacity(num_islands);
        let mut endpoints = Vec::with_capacity(num_islands);
        for _ in 0..num_islands {
            let (command_tx, command_rx) = channel();
            let (report_tx, report_rx) = channel();
            links.push((command_tx, report_rx));
            endpoints.push(IslandEndpoint {
                commands: command_rx,
                reports: report_tx,
            });
        }
        (Self { links }, endpoints)
    }

    /// Returns the number of islands in the collective.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Returns true when the collective spans no islands.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Delivers a copy of the command to every island (one-to-all).
    ///
    /// # Errors
    ///
    /// Returns `GaError::IslandFailure` if any island has disconnected.
    pub fn broadcast(&self, command: &SegmentCommand) -> Result<()> {
        for (island, (command_tx, _)) in self.links.iter().enumerate() {
            command_tx.send(command.clone()).map_err(|_| {
                GaError::IslandFailure(format!(
                    "island {} disconnected before receiving segment {}",
                    island, command.segment
                ))
            })?;
        }
        Ok(())
    }

    /// Blocks until every island has reported, returning reports in island
    /// order (all-to-one).
    ///
    /// # Errors
    ///
    /// Returns `GaError::IslandFailure` if an island disconnects before
    /// reporting, or the island's own error if its segment failed.
    pub fn gather(&self) -> Result<Vec<IslandReport>> {
        let mut reports = Vec::with_capacity(self.links.len());
        for (island, (_, report_rx)) in self.links.iter().enumerate() {
            let report = report_rx.recv().map_err(|_| {
                GaError::IslandFailure(format!(
                    "island {} disconnected before reporting its segment best",
                    island
                ))
            })??;
            reports.push(report);
        }
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::Route;
    use std::thread;

    fn report(island: usize, fitness: f64) -> IslandReport {
        IslandReport {
            island,
            fitness,
            route: Route::from_nodes(vec![0, 1, 2, 3]),
        }
    }

    #[test]
    fn test_broadcast_reaches_every_island() {
        let (collective, endpoints) = Collective::new(3);
        let command = SegmentCommand {
            segment: 0,
            generations: 10,
            elite: None,
        };

        collective.broadcast(&command).unwrap();

        for endpoint in &endpoints {
            let received = endpoint.next_command().unwrap();
            assert_eq!(received.segment, 0);
            assert_eq!(received.generations, 10);
        }
    }

    #[test]
    fn test_gather_collects_in_island_order() {
        let (collective, endpoints) = Collective::new(3);

        let handles: Vec<_> = endpoints
            .into_iter()
            .enumerate()
            .map(|(i, endpoint)| {
                thread::spawn(move || {
                    endpoint.submit(Ok(report(i, -(i as f64))));
                })
            })
            .collect();

        let reports = collective.gather().unwrap();
        for handle in handles {
            handle.join().unwrap();
        }

        let islands: Vec<usize> = reports.iter().map(|r| r.island).collect();
        assert_eq!(islands, vec![0, 1, 2]);
    }

    #[test]
    fn test_gather_blocks_until_all_report() {
        let (collective, mut endpoints) = Collective::new(2);
        let slow = endpoints.pop().unwrap();
        let fast = endpoints.pop().unwrap();

        fast.submit(Ok(report(0, -5.0)));
        let handle = thread::spawn(move || {
            thread::sleep(std::time::Duration::from_millis(50));
            slow.submit(Ok(report(1, -4.0)));
        });

        let reports = collective.gather().unwrap();
        handle.join().unwrap();
        assert_eq!(reports.len(), 2);
    }

    #[test]
    fn test_disconnected_island_fails_gather() {
        let (collective, endpoints) = Collective::new(2);
        drop(endpoints);

        let result = collective.gather();
        assert!(matches!(result, Err(GaError::IslandFailure(_))));
    }

    #[test]
    fn test_disconnected_island_fails_broadcast() {
        let (collective, endpoints) = Collective::new(2);
        drop(endpoints);

        let command = SegmentCommand {
            segment: 0,
            generations: 1,
            elite: None,
        };
        let result = collective.broadcast(&command);
        assert!(matches!(result, Err(GaError::IslandFailure(_))));
    }

    #[test]
    fn test_island_error_propagates_through_gather() {
        let (collective, endpoints) = Collective::new(1);
        endpoints[0].submit(Err(GaError::UniquenessExhausted {
            produced: 3,
            target: 10,
            attempts: 100,
        }));

        let result = collective.gather();
        assert!(matches!(
            result,
            Err(GaError::UniquenessExhausted { .. })
        ));
    }

    #[test]
    fn test_shutdown_signals_islands() {
        let (collective, endpoints) = Collective::new(1);
        drop(collective);
        assert!(endpoints[0].next_command().is_none());
    }
}
