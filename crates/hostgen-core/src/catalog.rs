//! Known environment, server-function, and OS template codes.
//!
//! These are the values the portal offers. The allocator does not require a
//! code to be listed here; callers use the catalog to label and sanity-check
//! their input.

/// `(code, label)` pairs for deployment environments.
pub const ENVIRONMENTS: &[(&str, &str)] = &[
    ("U", "UAT"),
    ("D", "DEVELOPMENT"),
    ("P", "PRODUCTION"),
    ("E", "EVALUATION POC"),
    ("B", "BCM"),
    ("F", "FACTORY"),
    ("T", "INTEGRATED TEST"),
    ("Q", "QUALITY ASSURANCE"),
    ("R", "RUN THE BANK"),
];

/// `(code, label)` pairs for server functions.
pub const SERVER_FUNCTIONS: &[(&str, &str)] = &[
    ("FSX", "AWS FSX"),
    ("SCM", "SCCM"),
    ("APP", "APPLICATION"),
    ("AUT", "AUTOMATION"),
    ("EAC", "ATTENDANT CONSOLE"),
    ("AGP", "AVAILABILITY GROUP"),
    ("BKP", "BACK SERVER"),
    ("CXW", "CITRIX XENAPP"),
    ("CLT", "CLUSTER"),
    ("NOD", "CLUSTER NODE"),
    ("NO1", "CLUSTER NODE 09"),
    ("NO2", "CLUSTER NODE 19"),
    ("NO3", "CLUSTER NODE 29"),
    ("CRO", "CLUSTER ROLE"),
    ("DOM", "DOMAIN CONTROLLER"),
    ("MBX", "EXCHANGE"),
    ("CAS", "EXCHANGE CAS"),
    ("FLE", "FILE SERVER"),
    ("MON", "MONITOR"),
    ("NAS", "NAS"),
    ("NCE", "NICE"),
    ("ORA", "ORACLE"),
    ("ORC", "ORACLE CONTAINER"),
    ("ORR", "ORACLE RAC"),
    ("SCAN", "SCAN NAME"),
    ("LTR", "SQL LISTENER"),
    ("SQL", "SQL SERVER"),
    ("VIP", "VIRTUAL IP"),
    ("ESX", "VMWARE ESXI"),
    ("AFH", "WEBFRAM"),
    ("WEB", "WEB INTERFACE"),
    ("WWW", "WEB SERVICE"),
    ("DPX", "DELPHIX"),
    ("VOM", "VERITAS OPERATIONS MANAGER"),
    ("BIG", "BIG IP"),
    ("XEN", "XEN MOBILE"),
    ("NSC", "NETSCALER"),
    ("EGW", "E-MAIL GATEWAY"),
    ("ILO", "ILO INTERFACE"),
    ("VCM", "VIRTUAL CONNECT"),
    ("VDI", "VDI XEN DESKTOP"),
    ("STF", "STOREFRONT"),
    ("HPS", "HP STORAGE"),
    ("PSP", "VMWARE VCENTER"),
    ("WMQ", "WEBSPHERE MQ"),
    ("RSA", "RSA"),
    ("ADF", "ACTIVE DIRECTORY FEDERATION"),
    ("BEN", "BLADE ENCLOSURE"),
    ("EMC", "STORAGE EMC"),
    ("UFV", "UNISPHERE FOR VMAX"),
    ("PSC", "PSC"),
    ("CON", "CONTROLLER"),
    ("RDS", "REDIS"),
    ("RSK", "RISK"),
    ("SHP", "SHAREPOINT"),
    ("VIR", "MCAFEE"),
    ("MSM", "MSMQ"),
    ("HYP", "HYPER-V"),
    ("APG", "API GATEWAY"),
    ("COM", "WCF COM"),
    ("RPT", "REPORTING SERVICES"),
    ("KMS", "KMS"),
    ("NAC", "NAC"),
    ("VRA", "VRA"),
];

/// `(value, label)` pairs for the OS templates offered by the portal.
pub const OS_TEMPLATES: &[(&str, &str)] = &[
    ("windows-server-2019", "Windows Server 2019"),
    ("windows-server-2022", "Windows Server 2022"),
    ("windows-server-2025", "Windows Server 2025"),
    ("redhat-8", "Red Hat 8"),
    ("redhat-9", "Red Hat 9"),
    ("mac-apple", "Mac Apple (M)"),
    ("appliance", "Appliance (A)"),
    ("centos", "CentOS (L)"),
    ("cifs-storage", "CIFS/Storage (D)"),
    ("enclosure", "Enclosure (E)"),
    ("linux", "Linux (L)"),
    ("linuxrhel5", "Linux RHEL 5 (L)"),
    ("linuxrhel6", "Linux RHEL 6 (L)"),
    ("linuxrhel7", "Linux RHEL 7 (L)"),
    ("solaris", "Solaris (S)"),
    ("solaris-10", "Solaris 10 (S)"),
    ("solaris-11", "Solaris 11 (L)"),
    ("vmware", "VMware (V)"),
    ("freebsd", "FreeBSD (F)"),
];

fn lookup(table: &'static [(&'static str, &'static str)], code: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, label)| *label)
}

/// Label for an environment code, if it is a known one.
pub fn environment_label(code: &str) -> Option<&'static str> {
    lookup(ENVIRONMENTS, code)
}

/// Label for a server-function code, if it is a known one.
pub fn server_function_label(code: &str) -> Option<&'static str> {
    lookup(SERVER_FUNCTIONS, code)
}

/// The portal template an OS identifier names, matched against either the
/// template value or its label.
pub fn os_template(os: &str) -> Option<(&'static str, &'static str)> {
    OS_TEMPLATES
        .iter()
        .find(|(value, label)| value.eq_ignore_ascii_case(os) || label.eq_ignore_ascii_case(os))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_have_labels() {
        assert_eq!(environment_label("P"), Some("PRODUCTION"));
        assert_eq!(environment_label("d"), Some("DEVELOPMENT"));
        assert_eq!(server_function_label("SQL"), Some("SQL SERVER"));
        assert_eq!(server_function_label("SCAN"), Some("SCAN NAME"));
    }

    #[test]
    fn unknown_codes_have_no_label() {
        assert_eq!(environment_label("Z"), None);
        assert_eq!(server_function_label("XYZ"), None);
    }

    #[test]
    fn os_templates_match_value_or_label() {
        assert_eq!(
            os_template("windows-server-2022"),
            Some(("windows-server-2022", "Windows Server 2022"))
        );
        assert_eq!(os_template("solaris 11 (l)"), Some(("solaris-11", "Solaris 11 (L)")));
        assert_eq!(os_template("plan9"), None);
    }

    #[test]
    fn catalog_codes_are_unique() {
        for table in [ENVIRONMENTS, SERVER_FUNCTIONS, OS_TEMPLATES] {
            let mut codes: Vec<_> = table.iter().map(|(c, _)| *c).collect();
            codes.sort_unstable();
            codes.dedup();
            assert_eq!(codes.len(), table.len());
        }
    }
}
