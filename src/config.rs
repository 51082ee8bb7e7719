//! Process glue: CLI parsing and the static peer table.

use clap::Parser;

/// `graph-server <http_port> -p <part 1..3> -l <peer0> <peer1> <peer2>`
///
/// `-p` is 1-based on the CLI surface, matching the original tool; it is
/// normalized to a 0-based partition index in [`Config::from_cli`].
#[derive(Parser, Debug)]
#[command(name = "graph-server")]
struct Cli {
    http_port: u16,

    #[arg(short = 'p')]
    part: u8,

    #[arg(short = 'l', num_args = 3)]
    peers: Vec<String>,
}

/// One entry of the static peer table: a `host:port` endpoint for a
/// partition's HTTP API. The RPC port is derived from the same entry (the
/// port portion after the colon).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerEndpoint {
    pub host: String,
    pub port: u16,
}

impl PeerEndpoint {
    fn parse(raw: &str) -> anyhow::Result<Self> {
        let (host, port) = raw
            .rsplit_once(':')
            .ok_or_else(|| anyhow::anyhow!("peer endpoint `{raw}` is not in host:port form"))?;
        let port: u16 = port.parse()?;
        Ok(Self { host: host.to_string(), port })
    }
}

/// Resolved process configuration, immutable for the lifetime of the
/// server.
#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub part: u8,
    pub peers: [PeerEndpoint; 3],
}

impl Config {
    pub fn parse_args() -> anyhow::Result<Self> {
        let cli = Cli::parse();
        Self::from_cli(cli.http_port, cli.part, &cli.peers)
    }

    fn from_cli(http_port: u16, part_1based: u8, peers: &[String]) -> anyhow::Result<Self> {
        anyhow::ensure!(
            (1..=3).contains(&part_1based),
            "partition index -p must be in 1..=3, got {part_1based}"
        );
        anyhow::ensure!(peers.len() == 3, "-l requires exactly 3 peer endpoints, got {}", peers.len());

        let parsed: Vec<PeerEndpoint> =
            peers.iter().map(|p| PeerEndpoint::parse(p)).collect::<anyhow::Result<_>>()?;
        let peers: [PeerEndpoint; 3] =
            parsed.try_into().map_err(|_| anyhow::anyhow!("expected exactly 3 peers"))?;

        Ok(Self { http_port, part: part_1based - 1, peers })
    }

    /// The RPC port this peer listens on: the port portion of its own
    /// entry in the peer table.
    pub fn rpc_port(&self) -> u16 {
        self.peers[self.part as usize].port
    }

    pub fn peer(&self, partition: u8) -> &PeerEndpoint {
        &self.peers[partition as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_cli_normalizes_one_based_partition() {
        let peers = vec!["127.0.0.1:9001".to_string(), "127.0.0.1:9002".to_string(), "127.0.0.1:9003".to_string()];
        let config = Config::from_cli(8080, 1, &peers).unwrap();
        assert_eq!(config.part, 0);
        assert_eq!(config.rpc_port(), 9001);
    }

    #[test]
    fn from_cli_rejects_out_of_range_partition() {
        let peers = vec!["a:1".to_string(), "b:2".to_string(), "c:3".to_string()];
        assert!(Config::from_cli(8080, 0, &peers).is_err());
        assert!(Config::from_cli(8080, 4, &peers).is_err());
    }

    #[test]
    fn from_cli_rejects_wrong_peer_count() {
        let peers = vec!["a:1".to_string(), "b:2".to_string()];
        assert!(Config::from_cli(8080, 1, &peers).is_err());
    }

    #[test]
    fn peer_endpoint_parse_rejects_missing_port() {
        assert!(PeerEndpoint::parse("host-without-port").is_err());
    }
}
