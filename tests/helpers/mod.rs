//! Shared fixtures for integration tests
//!
//! Text samples shaped like real APIC CLI output, plus helpers to lay
//! them out as files in a temporary directory.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// `moquery -c fvRsPathAtt ... | grep dn` output for VLANs 623 and 712
pub const MOQUERY: &str = "\
dn : uni/tn-MDR-SF-DC/ap-MDR-SF/epg-VLAN623-10.204.85.128-27/rspathAtt-[topology/pod-1/paths-303/pathep-[eth1/6]]
dn : uni/tn-MDR-SF-DC/ap-MDR-SF/epg-VLAN623-10.204.85.128-27/rspathAtt-[topology/pod-2/protpaths-425-426/pathep-[425-426-VPC-31-32-PG]]
dn : uni/tn-MDR-SF-DC/ap-MDR-SF/epg-VLAN712-WEB/rspathAtt-[topology/pod-2/paths-410/pathep-[eth1/1]]
dn : uni/tn-MDR-SF-DC/ap-MDR-SF/epg-VLAN712-WEB/rspathAtt-[topology/pod-2/protpaths-427-428/pathep-[427-428-VPC-1-2-PG]]
";

/// `show endpoints ip 10.204.85.130` for an endpoint in VLAN 623
pub const ENDPOINT_623: &str = "\
 Legend:
 s - arp     H - vtep     V - vpc-attached     p - peer-aged
+-----------------------------------+---------------+-----------------+--------------+-------------+
      Node       Interface            Encap           IP               MAC
+-----------------------------------+---------------+-----------------+--------------+-------------+
   303        eth1/5                 vlan-623        10.204.85.130    00:50:56:aa:bb:01
   303        eth1/6                 vlan-623        10.204.85.131    00:50:56:aa:bb:02
   425        vpc 425-426-VPC-31-32-PG  vlan-623     10.204.85.140    00:50:56:aa:bb:03
";

/// Endpoint lookup for VLAN 712
pub const ENDPOINT_712: &str = "\
   410        eth1/1                 vlan-712        10.204.90.10     00:50:56:aa:cc:01
   425        vpc 425-426-VPC-31-32-PG  vlan-712     10.204.90.11     00:50:56:aa:cc:02
";

/// Several `show endpoints ip` outputs pasted together
pub const BULK_ENDPOINTS: &str = "\
apic1# show endpoints ip 10.204.85.130
 Dynamic Endpoints:
 Tenant      : MDR-SF-DC
 Application : MDR-SF
 AEPg        : VLAN623-10.204.85.128-27

 End Point MAC      IP Address       Node       Interface       Encap
 -----------------  ---------------  ---------  --------------  ----------
 00:50:56:AA:BB:01  10.204.85.130    303        eth1/5          vlan-623
 00:50:56:AA:BB:02  10.204.85.131    303        eth1/6          vlan-623

apic1# show endpoints ip 10.204.90.11
 AEPg        : VLAN712-WEB
 00:50:56:AA:CC:02  10.204.90.11     425 426    425-426-VPC-31-32-PG  vlan-712
";

/// Temporary directory holding fixture files
pub struct Fixtures {
    pub dir: TempDir,
}

impl Fixtures {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("write fixture");
        path
    }

    pub fn arg(&self, name: &str, content: &str) -> String {
        self.write(name, content).to_string_lossy().to_string()
    }
}
