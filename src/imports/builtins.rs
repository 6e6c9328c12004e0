//! Built-in component classes known to the simulation engine.
//!
//! Custom classes are classified by intersecting their declared base classes
//! with these sets, and a custom class may not register under the key of a
//! built-in one.

use super::ComponentCategory;
use rustc_hash::FxHashSet;
use std::sync::LazyLock;

/// Abstract parameter bases that never appear as a `type` in a document.
const PARAMETER_BASES: &[&str] = &[
    "Parameter",
    "IndexParameter",
    "AbstractInterpolatedParameter",
    "AbstractThresholdParameter",
    "AbstractProfileParameter",
    "AbstractControlCurveParameter",
    "AggregatedParameterBase",
];

const PARAMETER_CLASSES: &[&str] = &[
    "ConstantParameter",
    "ConstantScenarioParameter",
    "ConstantScenarioIndexParameter",
    "DataFrameParameter",
    "TablesArrayParameter",
    "ArrayIndexedParameter",
    "ArrayIndexedScenarioParameter",
    "ArrayIndexedScenarioMonthlyFactorsParameter",
    "DailyProfileParameter",
    "WeeklyProfileParameter",
    "MonthlyProfileParameter",
    "UniformDrawdownProfileParameter",
    "RbfProfileParameter",
    "ScenarioDailyProfileParameter",
    "ScenarioWeeklyProfileParameter",
    "ScenarioMonthlyProfileParameter",
    "ScenarioWrapperParameter",
    "AggregatedParameter",
    "AggregatedIndexParameter",
    "NegativeParameter",
    "MaxParameter",
    "MinParameter",
    "NegativeMaxParameter",
    "NegativeMinParameter",
    "DivisionParameter",
    "OffsetParameter",
    "PiecewiseIntegralParameter",
    "InterpolatedParameter",
    "InterpolatedVolumeParameter",
    "InterpolatedFlowParameter",
    "InterpolatedQuadratureParameter",
    "ControlCurveParameter",
    "ControlCurveIndexParameter",
    "ControlCurveInterpolatedParameter",
    "ControlCurvePiecewiseInterpolatedParameter",
    "IndexedArrayParameter",
    "StorageThresholdParameter",
    "NodeThresholdParameter",
    "ParameterThresholdParameter",
    "RecorderThresholdParameter",
    "CurrentYearThresholdParameter",
    "CurrentOrdinalDayThresholdParameter",
    "MultipleThresholdIndexParameter",
    "MultipleThresholdParameterIndexParameter",
    "AnnualHarmonicSeriesParameter",
    "FlowParameter",
    "FlowDelayParameter",
    "DiscountFactorParameter",
    "HydropowerTargetParameter",
    "StorageParameter",
    "DeficitParameter",
    "Polynomial1DParameter",
    "Polynomial2DStorageParameter",
    "AnnualCountIndexParameter",
    "AnnualExponentialLicenseParameter",
    "AnnualHyperbolicLicenseParameter",
];

const RECORDER_BASES: &[&str] = &[
    "Recorder",
    "NodeRecorder",
    "StorageRecorder",
    "ParameterRecorder",
    "IndexParameterRecorder",
    "BaseConstantNodeRecorder",
    "BaseConstantStorageRecorder",
    "BaseConstantParameterRecorder",
];

const RECORDER_CLASSES: &[&str] = &[
    "AggregatedRecorder",
    "CSVRecorder",
    "TablesRecorder",
    "NumpyArrayNodeRecorder",
    "NumpyArrayStorageRecorder",
    "NumpyArrayNormalisedStorageRecorder",
    "NumpyArrayLevelRecorder",
    "NumpyArrayAreaRecorder",
    "NumpyArrayParameterRecorder",
    "NumpyArrayIndexParameterRecorder",
    "NumpyArrayDailyProfileParameterRecorder",
    "NumpyArrayNodeDeficitRecorder",
    "NumpyArrayNodeSuppliedRatioRecorder",
    "NumpyArrayNodeCurtailmentRatioRecorder",
    "FlowDurationCurveRecorder",
    "StorageDurationCurveRecorder",
    "SeasonalFlowDurationCurveRecorder",
    "FlowDurationCurveDeviationRecorder",
    "TotalDeficitNodeRecorder",
    "TotalFlowNodeRecorder",
    "MeanFlowNodeRecorder",
    "RollingMeanFlowNodeRecorder",
    "DeficitFrequencyNodeRecorder",
    "MinimumVolumeStorageRecorder",
    "MinimumThresholdVolumeStorageRecorder",
    "TimestepCountIndexParameterRecorder",
    "AnnualCountIndexThresholdRecorder",
    "AnnualCountIndexParameterRecorder",
    "AnnualTotalFlowRecorder",
    "MeanParameterRecorder",
    "TotalParameterRecorder",
    "HydropowerRecorder",
    "TotalHydroEnergyRecorder",
    "GaussianKDEStorageRecorder",
    "NormalisedGaussianKDEStorageRecorder",
    "EventRecorder",
    "EventDurationRecorder",
    "EventStatisticRecorder",
];

const NODE_BASES: &[&str] = &[
    "Node",
    "Loadable",
    "Drawable",
    "Connectable",
    "BaseNode",
    "BaseLink",
    "BaseInput",
    "BaseOutput",
    "AbstractNode",
    "AbstractStorage",
];

const NODE_CLASSES: &[&str] = &[
    "Input",
    "Output",
    "Link",
    "Storage",
    "Reservoir",
    "VirtualStorage",
    "AnnualVirtualStorage",
    "SeasonalVirtualStorage",
    "MonthlyVirtualStorage",
    "RollingVirtualStorage",
    "AggregatedStorage",
    "AggregatedNode",
    "Catchment",
    "River",
    "RiverSplit",
    "RiverSplitWithGauge",
    "RiverGauge",
    "Discharge",
    "Terminator",
    "PiecewiseLink",
    "MultiSplitLink",
    "BreakLink",
    "DelayNode",
    "LossLink",
    "ProportionalInput",
    "KeatingAquifer",
    "Rectifier",
];

struct Registry {
    bases: FxHashSet<&'static str>,
    keys: FxHashSet<String>,
}

impl Registry {
    fn build(category: ComponentCategory, bases: &[&'static str], classes: &[&'static str]) -> Self {
        Self {
            bases: bases.iter().chain(classes).copied().collect(),
            keys: classes.iter().map(|class| category.key_of(class)).collect(),
        }
    }
}

static PARAMETERS: LazyLock<Registry> = LazyLock::new(|| {
    Registry::build(ComponentCategory::Parameter, PARAMETER_BASES, PARAMETER_CLASSES)
});
static RECORDERS: LazyLock<Registry> = LazyLock::new(|| {
    Registry::build(ComponentCategory::Recorder, RECORDER_BASES, RECORDER_CLASSES)
});
static NODES: LazyLock<Registry> =
    LazyLock::new(|| Registry::build(ComponentCategory::Node, NODE_BASES, NODE_CLASSES));

fn registry(category: ComponentCategory) -> &'static Registry {
    match category {
        ComponentCategory::Parameter => &PARAMETERS,
        ComponentCategory::Recorder => &RECORDERS,
        ComponentCategory::Node => &NODES,
    }
}

/// Whether `class_name` is a known base class of `category`.
pub fn is_known_base(category: ComponentCategory, class_name: &str) -> bool {
    registry(category).bases.contains(class_name)
}

/// Whether `key` is already registered by a built-in class of `category`.
pub fn is_builtin_key(category: ComponentCategory, key: &str) -> bool {
    registry(category).keys.contains(key)
}
