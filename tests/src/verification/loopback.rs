#![cfg(test)]
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use hcheck_common::network::target::{Role, Target};
use hcheck_core::network::dns::SystemResolver;
use hcheck_core::network::ping::SystemPinger;
use hcheck_core::network::tcp::TcpConnectScanner;
use hcheck_core::probe::Probes;
use hcheck_core::EndpointVerifier;
use tokio::net::TcpListener;

use crate::support::{ScriptedPinger, ScriptedResolver};

const LOCALHOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

/// Real TCP probes against loopback, scripted ping and DNS.
fn loopback_probes() -> Probes {
    Probes::new(
        ScriptedPinger::default(),
        TcpConnectScanner::new(Duration::from_secs(1)),
        ScriptedResolver::default(),
    )
}

#[tokio::test]
async fn listening_port_satisfies_allowed_and_violates_blocked() {
    let listener = TcpListener::bind((LOCALHOST, 0)).await.unwrap();
    let open_port = listener.local_addr().unwrap().port();
    let closed = TcpListener::bind((LOCALHOST, 0)).await.unwrap();
    let closed_port = closed.local_addr().unwrap().port();
    drop(closed);

    let target = Target::new("local", Role::Public, LOCALHOST)
        .with_allowed([open_port, closed_port])
        .with_blocked([open_port]);

    let result = EndpointVerifier::new(loopback_probes(), false)
        .verify(&target)
        .await;

    assert!(!result.success());
    assert_eq!(result.wrong_state_allowed(), &[closed_port]);
    assert_eq!(result.wrong_state_blocked(), &[open_port]);
}

#[tokio::test]
async fn nothing_declared_on_loopback_is_healthy() {
    let target = Target::new("local", Role::Internal, LOCALHOST);

    let result = EndpointVerifier::new(loopback_probes(), false)
        .verify(&target)
        .await;

    assert!(result.success());
}

#[tokio::test]
#[ignore]
async fn localhost_passes_with_system_probes() {
    let probes = Probes::new(
        SystemPinger::new(Duration::from_secs(1)),
        TcpConnectScanner::new(Duration::from_secs(1)),
        SystemResolver::new(Duration::from_secs(3)),
    );
    let target = Target::new("local", Role::Public, LOCALHOST).with_hostname("localhost");

    let result = EndpointVerifier::new(probes, false).verify(&target).await;

    assert!(result.success(), "{result:?}");
}
