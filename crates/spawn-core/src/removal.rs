//! Per-feature removal routines.
//!
//! Each routine is a fixed composition of the [`FileRecord`] primitives that
//! strips one feature out of the reference tree: its dependency-manifest
//! lines, its tagged content, the constructs mentioning its identifiers in a
//! known set of files, and the files that exist only for it. Every routine
//! is idempotent.

use tracing::trace;

use crate::config::ChainConfig;
use crate::error::Result;
use crate::features::Feature;
use crate::file::FileRecord;
use crate::replace::{APP_FILE, E2E_WORKFLOW, SETUP_FILE, TEST_ICS_NODE_SCRIPT, TEST_NODE_SCRIPT};

const ANTE_FILE: &str = "app/ante.go";
const ENCODING_FILE: &str = "app/encoding.go";
const APP_TEST_FILE: &str = "app/app_test.go";
const SIM_TEST_FILE: &str = "app/sim_test.go";
const TEST_HELPERS_FILE: &str = "app/test_helpers.go";
const ROOT_CMD_FILE: &str = "cmd/wasmd/root.go";
const COMMANDS_FILE: &str = "cmd/wasmd/commands.go";
const MAKEFILE: &str = "Makefile";

/// Auxiliary tag: content that only exists when ICS is not used.
pub const NOT_ICS_TAG: &str = "not-ics";

/// A removal routine for one feature.
pub type RemovalFn = fn(&mut FileRecord, &ChainConfig) -> Result<()>;

/// The removal routine for `feature`.
pub fn removal_routine(feature: Feature) -> RemovalFn {
    match feature {
        Feature::Tokenfactory => remove_tokenfactory,
        Feature::Poa => remove_poa,
        Feature::Globalfee => remove_globalfee,
        Feature::Cosmwasm => remove_cosmwasm,
        Feature::WasmLc => remove_wasm_light_client,
        Feature::Packetforward => remove_packet_forward,
        Feature::IbcRatelimit => remove_ibc_rate_limit,
        Feature::Ignite => remove_ignite,
        Feature::Ics => remove_ics,
        Feature::Staking => remove_staking,
    }
}

/// Run the routine of every disabled feature in registry order, the ICS
/// dependent post-processing, and the final marker sweep.
pub fn remove_disabled_features(f: &mut FileRecord, cfg: &ChainConfig) -> Result<()> {
    for feature in cfg.disabled().iter() {
        trace!(path = %f.relative_path(), %feature, "removing feature");
        removal_routine(feature)(f, cfg)?;
    }

    if cfg.is_enabled(Feature::Ics) {
        f.delete_contents_if_path_is(TEST_NODE_SCRIPT);
        f.handle_all_tagged(NOT_ICS_TAG)?;
        remove_packet_forward_tests(f);
        if f.relative_path() == MAKEFILE {
            f.remove_any_line_matching(TEST_NODE_SCRIPT);
        }
    } else if f.relative_path() == MAKEFILE {
        f.remove_any_line_matching(TEST_ICS_NODE_SCRIPT);
    }

    f.remove_tagged_lines("", false)
}

pub fn remove_tokenfactory(f: &mut FileRecord, _cfg: &ChainConfig) -> Result<()> {
    let tag = Feature::Tokenfactory.as_str();
    f.remove_import_line("github.com/strangelove-ventures/tokenfactory");
    f.handle_all_tagged(tag)?;
    f.remove_construct_by_identifier(
        tag,
        &[APP_FILE, TEST_NODE_SCRIPT, TEST_ICS_NODE_SCRIPT, SETUP_FILE, E2E_WORKFLOW],
    );
    f.delete_contents_if_path_is("interchaintest/tokenfactory_test.go");
    Ok(())
}

pub fn remove_poa(f: &mut FileRecord, _cfg: &ChainConfig) -> Result<()> {
    let tag = Feature::Poa.as_str();
    f.remove_import_line("github.com/strangelove-ventures/poa");
    f.handle_all_tagged(tag)?;
    f.remove_construct_by_identifier(
        tag,
        &[APP_FILE, ANTE_FILE, TEST_NODE_SCRIPT, TEST_ICS_NODE_SCRIPT, SETUP_FILE, E2E_WORKFLOW],
    );
    f.delete_contents_if_path_is("interchaintest/poa_test.go");
    f.delete_contents_if_path_is("interchaintest/poa.go");
    Ok(())
}

pub fn remove_globalfee(f: &mut FileRecord, _cfg: &ChainConfig) -> Result<()> {
    f.remove_import_line("github.com/strangelove-ventures/globalfee");
    f.handle_all_tagged(Feature::Globalfee.as_str())?;
    f.remove_constructs(&["globalfee", "GlobalFeeKeeper"], &[APP_FILE, ANTE_FILE, SETUP_FILE]);
    Ok(())
}

pub fn remove_cosmwasm(f: &mut FileRecord, cfg: &ChainConfig) -> Result<()> {
    f.remove_import_line("github.com/CosmWasm/wasmd");
    // The light client links against the same VM.
    if cfg.is_disabled(Feature::WasmLc) {
        f.remove_import_line("github.com/CosmWasm/wasmvm");
    }

    f.handle_all_tagged(Feature::Cosmwasm.as_str())?;
    f.delete_contents_if_path_is("app/wasm.go");

    f.remove_constructs(
        &[
            "WasmKeeper",
            "wasmtypes",
            "wasmStack",
            "wasmOpts",
            "TXCounterStoreService",
            "WasmConfig",
            "wasmDir",
            "tokenfactorybindings",
            "github.com/CosmWasm/wasmd",
        ],
        &[APP_FILE, ANTE_FILE],
    );
    f.remove_construct_by_identifier(
        "wasmkeeper",
        &[ENCODING_FILE, APP_TEST_FILE, TEST_HELPERS_FILE, ROOT_CMD_FILE],
    );
    f.remove_construct_by_identifier(
        "wasm",
        &[
            ANTE_FILE,
            SIM_TEST_FILE,
            TEST_HELPERS_FILE,
            SETUP_FILE,
            COMMANDS_FILE,
            APP_TEST_FILE,
            ROOT_CMD_FILE,
            E2E_WORKFLOW,
        ],
    );

    f.delete_contents_if_path_is("interchaintest/cosmwasm_test.go");
    f.delete_directory_contents("interchaintest/contracts");
    Ok(())
}

pub fn remove_wasm_light_client(f: &mut FileRecord, _cfg: &ChainConfig) -> Result<()> {
    f.remove_import_line("github.com/cosmos/ibc-go/modules/light-clients/08-wasm");
    f.handle_all_tagged(Feature::WasmLc.as_str())?;
    f.remove_construct_by_identifier("wasmlc", &[APP_FILE]);
    Ok(())
}

pub fn remove_packet_forward(f: &mut FileRecord, _cfg: &ChainConfig) -> Result<()> {
    f.remove_import_line("github.com/cosmos/ibc-apps/middleware/packet-forward-middleware");
    f.handle_all_tagged(Feature::Packetforward.as_str())?;
    f.remove_constructs(&["packetforward", "PacketForward"], &[APP_FILE]);
    remove_packet_forward_tests(f);
    Ok(())
}

/// The end-to-end test and its workflow entry, which also go away under ICS.
fn remove_packet_forward_tests(f: &mut FileRecord) {
    f.remove_construct_by_identifier("packetforward", &[E2E_WORKFLOW]);
    f.delete_contents_if_path_is("interchaintest/packetforward_test.go");
}

pub fn remove_ibc_rate_limit(f: &mut FileRecord, _cfg: &ChainConfig) -> Result<()> {
    f.remove_import_line("github.com/Stride-Labs/ibc-rate-limiting");
    f.handle_all_tagged(Feature::IbcRatelimit.as_str())?;
    f.remove_construct_by_identifier("RatelimitKeeper", &[APP_FILE]);
    f.remove_construct_by_identifier("ratelimit", &[APP_FILE, E2E_WORKFLOW]);
    f.delete_contents_if_path_is("interchaintest/ibc_rate_limit_test.go");
    Ok(())
}

pub fn remove_ignite(f: &mut FileRecord, _cfg: &ChainConfig) -> Result<()> {
    f.handle_all_tagged(Feature::Ignite.as_str())?;
    f.delete_contents_if_path_is("config.yml");
    Ok(())
}

pub fn remove_ics(f: &mut FileRecord, _cfg: &ChainConfig) -> Result<()> {
    let tag = Feature::Ics.as_str();
    f.remove_import_line("github.com/cosmos/interchain-security");
    f.handle_all_tagged(tag)?;
    f.remove_construct_by_identifier(tag, &[E2E_WORKFLOW]);
    f.remove_constructs(&["ConsumerKeeper", "ScopedIBCConsumerKeeper"], &[APP_FILE]);

    for marker in [
        "ibcconsumer",
        "ibcconsumerkeeper",
        "ibcconsumertypes",
        "ibcconsumerante",
        "ibcdemocracyante",
    ] {
        f.remove_any_line_matching(marker);
    }

    f.delete_contents_if_path_is("cmd/wasmd/ics_consumer.go");
    f.delete_contents_if_path_is(TEST_ICS_NODE_SCRIPT);
    Ok(())
}

/// Proof-of-stake goes together with the modules that only make sense under it.
pub fn remove_staking(f: &mut FileRecord, cfg: &ChainConfig) -> Result<()> {
    remove_poa(f, cfg)?;

    f.handle_all_tagged(Feature::Staking.as_str())?;
    f.remove_constructs(&["StakingKeeper", "stakingtypes"], &[APP_FILE]);

    f.handle_all_tagged("mint")?;
    f.remove_constructs(&["MintKeeper", "mintkeeper"], &[APP_FILE]);
    f.remove_any_line_matching("minttypes.");

    f.handle_all_tagged("distribution")?;
    f.remove_constructs(&["distrtypes", "DistrKeeper", "distrkeeper"], &[APP_FILE]);

    f.handle_all_tagged("gov")?;
    f.remove_constructs(&["GovKeeper", "govtypes.StoreKey,", "govtypes.ModuleName,"], &[APP_FILE]);

    for helper in [SIM_TEST_FILE, TEST_HELPERS_FILE, APP_TEST_FILE, "cmd/wasmd/testnet.go"] {
        f.delete_contents_if_path_is(helper);
    }
    Ok(())
}
