//! # rs-upf
//!
//! A 5G User Plane Function (UPF) core: the data-plane node that sits
//! between the radio access network (gNodeB) and a data network in a 3GPP
//! 5G Core. It terminates PFCP on the control side, installs per-session
//! packet-processing rules dictated by the SMF, and forwards UE traffic by
//! encapsulating/decapsulating GTP-U tunnels and performing NAT toward the
//! data network interface (N6).
//!
//! ## Module organization
//!
//! - [`ie`] / [`message`] — the PFCP wire codec: IEs and messages as defined
//!   in 3GPP TS 29.244, restricted to the subset a UPF data path needs.
//! - [`session`] — the in-memory Session/PDR/FAR/QER rule store.
//! - [`pfcp`] — the PFCP control-channel state machine (association,
//!   session lifecycle, heartbeat) driving the session store.
//! - [`gtpu`] — the GTP-U header codec.
//! - [`queue`] — the bounded MPMC packet queue between the GTP-U reader and
//!   the worker pool.
//! - [`pipeline`] — the five-stage per-packet data-plane pipeline.
//! - [`nat`] — checksum-preserving SNAT/DNAT for the N6 egress/ingress.
//! - [`metrics`] — atomic packet/session counters.
//! - [`config`] — CLI + file configuration for the daemon.
//!
//! This crate is a library; `src/bin/upfd.rs` wires the pieces above into a
//! runnable daemon.

pub mod config;
pub mod error;
pub mod gtpu;
pub mod ie;
pub mod message;
pub mod metrics;
pub mod nat;
pub mod pfcp;
pub mod pipeline;
pub mod queue;
pub mod session;
pub mod types;
